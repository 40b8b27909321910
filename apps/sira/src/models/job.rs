use std::fmt;

use serde::{Deserialize, Serialize};

use super::backend::BackendResumeRecord;
use super::{null_as_default, string_or_number};

/// Opaque token correlating a generation, import or save with its artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, as shown in the editor header.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Addressable path of the editor page for this job.
    pub fn editor_path(&self) -> String {
        format!("/cv-editor/{}", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Queued,
    Processing,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Success | JobState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Queued => "QUEUED",
            JobState::Processing => "PROCESSING",
            JobState::Success => "SUCCESS",
            JobState::Failed => "FAILED",
            JobState::Unknown => "UNKNOWN",
        }
    }
}

/// GET check-job-status/<job>/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub status: JobState,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSummary {
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub status: Option<JobState>,
}

/// GET get-cv-data/<job>/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub cv_data: Option<BackendResumeRecord>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub status: Option<JobState>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub job: Option<JobSummary>,
}

impl ResumeEnvelope {
    /// The PDF URL from the envelope root, falling back to the nested job.
    pub fn pdf_url(&self) -> Option<&str> {
        self.pdf_url
            .as_deref()
            .or_else(|| self.job.as_ref().and_then(|j| j.pdf_url.as_deref()))
            .filter(|url| !url.is_empty())
    }

    /// Template id from the envelope or the record itself.
    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref().or_else(|| {
            self.cv_data
                .as_ref()
                .and_then(|record| record.template_id.as_deref())
        })
    }
}

/// POST update-cv-data/
#[derive(Debug, Serialize)]
pub struct UpdateResumeRequest<'a> {
    pub job_id: &'a JobId,
    pub cv_data: &'a BackendResumeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<&'a str>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateResumeResponse {
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub status: Option<JobState>,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST generate/
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub resume_id: JobId,
    #[serde(default)]
    pub status: Option<JobState>,
}

/// POST parse-cv-pdf/ and save-imported-cv/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub cv_data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_image: Option<String>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_parses_known_and_unknown() {
        let status: JobStatus =
            serde_json::from_str(r#"{ "job_id": "abc", "status": "PROCESSING" }"#).unwrap();
        assert_eq!(status.status, JobState::Processing);
        assert!(!status.status.is_terminal());

        let status: JobStatus = serde_json::from_str(r#"{ "status": "RETRYING" }"#).unwrap();
        assert_eq!(status.status, JobState::Unknown);
    }

    #[test]
    fn test_envelope_pdf_url_falls_back_to_job() {
        let env: ResumeEnvelope = serde_json::from_str(
            r#"{ "cv_data": {}, "pdf_url": null, "job": { "pdf_url": "http://x/cv.pdf" } }"#,
        )
        .unwrap();
        assert_eq!(env.pdf_url(), Some("http://x/cv.pdf"));
    }

    #[test]
    fn test_envelope_template_id_from_record() {
        let env: ResumeEnvelope =
            serde_json::from_str(r#"{ "cv_data": { "template_id": "classic" } }"#).unwrap();
        assert_eq!(env.template_id(), Some("classic"));
    }

    #[test]
    fn test_job_id_short_and_path() {
        let id = JobId::from("0f8e2c1a-77aa-4bcd-9e21-5a3c2b1d0e9f");
        assert_eq!(id.short(), "0f8e2c1a");
        assert_eq!(
            id.editor_path(),
            "/cv-editor/0f8e2c1a-77aa-4bcd-9e21-5a3c2b1d0e9f"
        );
        assert_eq!(JobId::from("abc").short(), "abc");
    }
}
