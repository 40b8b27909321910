//! Editor session: the document being edited, its visible sections and the
//! per-section list editors.

pub mod menu;
pub mod sections;
pub mod state;
pub mod subeditors;

pub use menu::AddSectionMenu;
pub use sections::{SectionId, ADDITIONAL_SECTIONS, BASE_SECTIONS};
pub use state::{DocumentField, EditorState, ResumeBackend, SaveOutcome};
pub use subeditors::{ListEditor, SectionRecord};
