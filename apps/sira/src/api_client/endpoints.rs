use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde_json::{json, Value};
use tracing::info;

use super::{ApiClient, ApiError};
use crate::models::job::{
    GenerateRequest, GenerateResponse, ImportResponse, TemplateSummary, UpdateResumeRequest,
    UpdateResumeResponse,
};
use crate::models::project::{Project, ProjectList};
use crate::models::user::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserProfile, UserStats,
};
use crate::models::{BackendResumeRecord, JobId, JobStatus, ResumeEnvelope};

impl ApiClient {
    /// Exchanges credentials for a token. The token is not stored here.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response: LoginResponse = self
            .post("api-token-auth/", &LoginRequest { username, password })
            .await?;
        Ok(response.token)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, ApiError> {
        let response: RegisterResponse = self
            .post(
                "register/",
                &RegisterRequest {
                    username,
                    email,
                    password,
                },
            )
            .await?;
        Ok(response.token)
    }

    /// A 401 here means "anonymous visitor" and leaves credentials alone.
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.get("users/me/").await
    }

    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.get("user-stats/").await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let projects: ProjectList = self.get("projects/").await?;
        Ok(projects.into_vec())
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("projects/{project_id}/")).await?;
        info!(project_id, "project deleted");
        Ok(())
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, ApiError> {
        self.get("templates/").await
    }

    pub async fn generate(&self, prompt: &str, language: &str) -> Result<JobId, ApiError> {
        let response: GenerateResponse = self
            .post("generate/", &GenerateRequest { prompt, language })
            .await?;
        info!(job_id = %response.resume_id, "generation queued");
        Ok(response.resume_id)
    }

    /// Uploads a PDF for field extraction under the multipart field `file`.
    pub async fn import_pdf(
        &self,
        file_name: &str,
        contents: Bytes,
    ) -> Result<ImportResponse, ApiError> {
        let length = contents.len() as u64;
        let part = Part::stream_with_length(contents, length)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);
        self.post_multipart("parse-cv-pdf/", form).await
    }

    pub async fn save_imported(&self, cv_data: &Value) -> Result<ImportResponse, ApiError> {
        self.post("save-imported-cv/", &json!({ "cv_data": cv_data }))
            .await
    }

    pub async fn fetch_resume(&self, job_id: &JobId) -> Result<ResumeEnvelope, ApiError> {
        self.get(&format!("get-cv-data/{job_id}/")).await
    }

    pub async fn update_resume(
        &self,
        job_id: &JobId,
        record: &BackendResumeRecord,
        template_id: Option<&str>,
    ) -> Result<UpdateResumeResponse, ApiError> {
        self.post(
            "update-cv-data/",
            &UpdateResumeRequest {
                job_id,
                cv_data: record,
                template_id,
            },
        )
        .await
    }

    pub async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ApiError> {
        self.get(&format!("check-job-status/{job_id}/")).await
    }
}
