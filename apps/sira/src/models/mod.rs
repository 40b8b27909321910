//! Data shapes exchanged with the backend and held by the editor.
//!
//! `backend` mirrors what the service persists, `resume` is the editing shape,
//! and `mapper` converts between the two.

pub mod backend;
pub mod entries;
pub mod job;
pub mod project;
pub mod resume;
pub mod user;

pub use backend::{
    BackendEducation, BackendExperience, BackendProject, BackendResponsibility,
    BackendResumeRecord, BackendSkillCategory,
};
pub use entries::{Entry, EntryKey, EntryList};
pub use job::{JobId, JobState, JobStatus, ResumeEnvelope};
pub use resume::{
    Contact, EducationItem, ExperienceItem, ProjectItem, ResumeDocument, SkillsSummary,
    VolunteerItem,
};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
///
/// The backend stores loosely-validated JSON, so list and string fields
/// regularly arrive as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts ids sent either as strings or as integer primary keys.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}
