//! Conversions between the backend record and the editing document.
//!
//! Every function here is pure and total: malformed or missing input degrades
//! to empty strings and lists instead of failing. The conversions are lossy
//! (see `skills` and `responsibilities`), so a document should go through a
//! round trip at most once per save.

pub mod date_range;
pub mod document;
pub mod responsibilities;
pub mod skills;

pub use date_range::{join_date_range, split_date_range};
pub use document::{document_from_record, record_from_document};
pub use responsibilities::{map_volunteer_from_backend, map_volunteer_to_backend};
pub use skills::{
    classify_category, map_skills_from_backend, map_skills_to_backend, Classification, SkillBucket,
};
