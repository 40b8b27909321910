use async_trait::async_trait;
use tracing::{info, warn};

use super::menu::AddSectionMenu;
use super::sections::{EnabledSections, SectionId};
use crate::api_client::{ApiClient, ApiError};
use crate::errors::ClientError;
use crate::mapper::{document_from_record, record_from_document};
use crate::models::job::UpdateResumeResponse;
use crate::models::{
    BackendResumeRecord, Contact, EducationItem, EntryList, ExperienceItem, JobId, ProjectItem,
    ResumeDocument, ResumeEnvelope, SkillsSummary, VolunteerItem,
};

/// The persistence calls the editor needs.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    async fn fetch_resume(&self, job_id: &JobId) -> Result<ResumeEnvelope, ApiError>;

    async fn update_resume(
        &self,
        job_id: &JobId,
        record: &BackendResumeRecord,
        template_id: Option<&str>,
    ) -> Result<UpdateResumeResponse, ApiError>;
}

#[async_trait]
impl ResumeBackend for ApiClient {
    async fn fetch_resume(&self, job_id: &JobId) -> Result<ResumeEnvelope, ApiError> {
        ApiClient::fetch_resume(self, job_id).await
    }

    async fn update_resume(
        &self,
        job_id: &JobId,
        record: &BackendResumeRecord,
        template_id: Option<&str>,
    ) -> Result<UpdateResumeResponse, ApiError> {
        ApiClient::update_resume(self, job_id, record, template_id).await
    }
}

/// Shallow replacement of one top-level document field.
#[derive(Debug, Clone)]
pub enum DocumentField {
    FullName(String),
    Contact(Contact),
    ProfessionalSummary(Option<String>),
    Experience(EntryList<ExperienceItem>),
    Education(EntryList<EducationItem>),
    Projects(EntryList<ProjectItem>),
    Skills(SkillsSummary),
    VolunteerExperience(EntryList<VolunteerItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub job_id: JobId,
    /// Editor path to show in place of the current one.
    pub editor_path: String,
    /// Whether the backend assigned a new job id.
    pub changed: bool,
}

/// The in-progress document and which tabs are visible. Owned by one editor
/// session and dropped with it.
#[derive(Debug)]
pub struct EditorState {
    job_id: JobId,
    document: Option<ResumeDocument>,
    template_id: Option<String>,
    pdf_url: Option<String>,
    sections: EnabledSections,
    active: SectionId,
    menu: AddSectionMenu,
    saving: bool,
}

impl EditorState {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            document: None,
            template_id: None,
            pdf_url: None,
            sections: EnabledSections::default(),
            active: SectionId::Personal,
            menu: AddSectionMenu::default(),
            saving: false,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn document(&self) -> Option<&ResumeDocument> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut ResumeDocument> {
        self.document.as_mut()
    }

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url.as_deref()
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn menu(&self) -> &AddSectionMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut AddSectionMenu {
        &mut self.menu
    }

    /// Fetches the record for the current job and loads it.
    pub async fn fetch<B: ResumeBackend + ?Sized>(&mut self, backend: &B) -> Result<(), ClientError> {
        let envelope = backend.fetch_resume(&self.job_id).await?;
        self.load_envelope(envelope)
    }

    pub fn load_envelope(&mut self, envelope: ResumeEnvelope) -> Result<(), ClientError> {
        let Some(record) = envelope.cv_data.as_ref() else {
            return Err(ClientError::NotFound(format!(
                "no résumé data for job {}",
                self.job_id
            )));
        };
        self.template_id = envelope.template_id().map(str::to_string);
        self.pdf_url = envelope.pdf_url().map(str::to_string);
        self.load(record);
        Ok(())
    }

    /// Replaces the document with a fresh mapping of `record`.
    pub fn load(&mut self, record: &BackendResumeRecord) {
        self.load_document(document_from_record(record));
    }

    pub fn load_document(&mut self, document: ResumeDocument) {
        self.sections.reload(&document);
        self.document = Some(document);
    }

    /// Returns `false` when nothing is loaded yet.
    pub fn update_field(&mut self, field: DocumentField) -> bool {
        let Some(doc) = self.document.as_mut() else {
            return false;
        };
        match field {
            DocumentField::FullName(v) => doc.full_name = v,
            DocumentField::Contact(v) => doc.contact = v,
            DocumentField::ProfessionalSummary(v) => doc.professional_summary = v,
            DocumentField::Experience(v) => doc.experience = v,
            DocumentField::Education(v) => doc.education = v,
            DocumentField::Projects(v) => doc.projects = v,
            DocumentField::Skills(v) => doc.skills = v,
            DocumentField::VolunteerExperience(v) => doc.volunteer_experience = v,
        }
        true
    }

    pub fn is_enabled(&self, section: SectionId) -> bool {
        section.is_base() || self.sections.contains(section)
    }

    pub fn visible_sections(&self) -> Vec<SectionId> {
        self.sections.visible()
    }

    /// Enables an additional section and switches to it. Base sections are
    /// always present, so adding one is a no-op.
    pub fn add_section(&mut self, section: SectionId) {
        if section.is_base() {
            return;
        }
        self.sections.add(section);
        self.active = section;
        self.menu.close();
    }

    /// Hides an additional section. Falls back to the personal tab if it was
    /// the active one.
    pub fn remove_section(&mut self, section: SectionId) {
        if section.is_base() {
            return;
        }
        self.sections.remove(section);
        if self.active == section {
            self.active = SectionId::Personal;
        }
    }

    /// Returns `false` for a hidden section.
    pub fn set_active(&mut self, section: SectionId) -> bool {
        if !self.is_enabled(section) {
            return false;
        }
        self.active = section;
        true
    }

    /// Persists the document. On success a new job id from the backend is
    /// adopted; on failure nothing local changes.
    pub async fn save<B: ResumeBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<SaveOutcome, ClientError> {
        let Some(doc) = self.document.as_ref() else {
            return Err(ClientError::NotFound(format!(
                "nothing loaded for job {}",
                self.job_id
            )));
        };
        if self.saving {
            return Err(ClientError::Validation(
                "a save is already in progress".to_string(),
            ));
        }

        let record = record_from_document(doc);
        let result = {
            self.saving = true;
            // Cleared on drop so a cancelled save does not lock the editor.
            let _saving = SavingFlag(&mut self.saving);
            backend
                .update_resume(&self.job_id, &record, self.template_id.as_deref())
                .await
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(job_id = %self.job_id, "save failed: {e}");
                return Err(ClientError::save(e));
            }
        };

        let changed = match response.job_id {
            Some(new_id) if new_id != self.job_id => {
                info!(old = %self.job_id, new = %new_id, "adopting job id from save");
                self.job_id = new_id;
                true
            }
            _ => false,
        };
        info!(job_id = %self.job_id, "résumé saved");

        Ok(SaveOutcome {
            editor_path: self.job_id.editor_path(),
            job_id: self.job_id.clone(),
            changed,
        })
    }
}

struct SavingFlag<'a>(&'a mut bool);

impl Drop for SavingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
