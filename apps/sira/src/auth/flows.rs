//! Sign-in and visitor flows.
//!
//! A visitor may start work before logging in: a generation prompt or a
//! parsed PDF import is parked in the pending store, the user is sent to the
//! login page, and the work is replayed once a token exists. Every flow ends
//! in a [`Landing`], the page the user should see next.

use std::path::Path;

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::ClientError;
use crate::models::user::UserProfile;
use crate::models::JobId;
use crate::state::AppState;
use crate::validation::{validate_pdf_upload, validate_prompt, validate_registration};

/// Login redirect marker set when a visitor tried to generate.
pub const REDIRECT_CV_CREATION: &str = "cv-creation";
/// Page that replays a pending import after sign-in.
pub const IMPORT_RESUME_PATH: &str = "/cv-import";

pub const MSG_LOGIN_FAILED: &str = "بريد إلكتروني أو كلمة مرور غير صحيحة. حاول مرة أخرى.";
pub const MSG_REGISTER_FAILED: &str = "حدث خطأ أثناء إنشاء الحساب. تأكد من البيانات.";
pub const MSG_CALLBACK_NO_TOKEN: &str = "فشل تسجيل الدخول. لم يتم استلام التوكن.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    Editor(JobId),
    Dashboard,
    Login { redirect: Option<String> },
    Redirect(String),
    Home,
}

impl Landing {
    pub fn path(&self) -> String {
        match self {
            Landing::Editor(job_id) => job_id.editor_path(),
            Landing::Dashboard => "/dashboard".to_string(),
            Landing::Login { redirect: None } => "/login".to_string(),
            Landing::Login {
                redirect: Some(redirect),
            } => format!("/login?redirect={redirect}"),
            Landing::Redirect(path) => path.clone(),
            Landing::Home => "/".to_string(),
        }
    }
}

/// Generates right away when signed in, otherwise parks the prompt and
/// sends the visitor to log in.
pub async fn generate_or_defer(state: &AppState, prompt: &str) -> Result<Landing, ClientError> {
    let prompt = validate_prompt(prompt)?;

    if state.credentials.token().await.is_none() {
        return defer_prompt(state, prompt).await;
    }

    match state.api.generate(prompt, &state.config.language).await {
        Ok(job_id) => Ok(Landing::Editor(job_id)),
        Err(e) if e.is_auth_failure() => defer_prompt(state, prompt).await,
        Err(e) => Err(e.into()),
    }
}

async fn defer_prompt(state: &AppState, prompt: &str) -> Result<Landing, ClientError> {
    state.pending.set_prompt(prompt).await?;
    info!("prompt parked until sign-in");
    Ok(Landing::Login {
        redirect: Some(REDIRECT_CV_CREATION.to_string()),
    })
}

pub async fn login_and_resume(
    state: &AppState,
    username: &str,
    password: &str,
    redirect: Option<&str>,
) -> Result<Landing, ClientError> {
    let token = match state.api.login(username, password).await {
        Ok(token) => token,
        Err(e) if matches!(e.status(), Some(400 | 401)) => {
            return Err(ClientError::Validation(MSG_LOGIN_FAILED.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    state.credentials.store(&token).await?;
    info!(username, "signed in");

    after_sign_in(state, redirect).await
}

/// OAuth callback: the provider hands the token back directly.
pub async fn accept_callback_token(
    state: &AppState,
    token: Option<&str>,
) -> Result<Landing, ClientError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ClientError::Validation(MSG_CALLBACK_NO_TOKEN.to_string()))?;
    state.credentials.store(token).await?;
    info!("signed in from callback");

    after_sign_in(state, None).await
}

pub async fn register(
    state: &AppState,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<Landing, ClientError> {
    validate_registration(username, email, password, confirm_password)?;

    let token = match state.api.register(username, email, password).await {
        Ok(token) => token,
        Err(e) if e.status() == Some(400) => {
            return Err(ClientError::Validation(MSG_REGISTER_FAILED.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    match token {
        Some(token) => {
            state.credentials.store(&token).await?;
            info!(username, "registered and signed in");
            after_sign_in(state, None).await
        }
        None => Ok(Landing::Login { redirect: None }),
    }
}

/// Replays parked work once a token is stored.
async fn after_sign_in(state: &AppState, redirect: Option<&str>) -> Result<Landing, ClientError> {
    if let Some(prompt) = state.pending.prompt().await? {
        return match state.api.generate(&prompt, &state.config.language).await {
            Ok(job_id) => {
                state.pending.clear_prompt().await?;
                Ok(Landing::Editor(job_id))
            }
            Err(e) => {
                warn!("pending generation failed: {e}");
                Ok(Landing::Dashboard)
            }
        };
    }

    match redirect {
        Some(IMPORT_RESUME_PATH) => resume_pending_import(state).await,
        Some(REDIRECT_CV_CREATION) | None => Ok(Landing::Dashboard),
        Some(path) => Ok(Landing::Redirect(path.to_string())),
    }
}

/// Uploads a PDF for extraction. Visitors get their parsed data parked and
/// are sent to log in; it is saved after sign-in.
pub async fn import_file(state: &AppState, path: &Path) -> Result<Landing, ClientError> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| ClientError::Import(format!("{}: {e}", path.display())))?;
    validate_pdf_upload(path, &contents)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("cv.pdf");
    let response = state
        .api
        .import_pdf(file_name, Bytes::from(contents))
        .await
        .map_err(ClientError::import)?;

    if let Some(job_id) = response.job_id {
        info!(job_id = %job_id, "import saved");
        return Ok(Landing::Editor(job_id));
    }
    match response.cv_data {
        Some(cv_data) => {
            state.pending.set_import(&cv_data).await?;
            info!("import parked until sign-in");
            Ok(Landing::Login {
                redirect: Some(IMPORT_RESUME_PATH.to_string()),
            })
        }
        None => Err(ClientError::Import(
            "response had neither job_id nor cv_data".to_string(),
        )),
    }
}

/// Saves a parked import. With nothing parked the user goes home.
pub async fn resume_pending_import(state: &AppState) -> Result<Landing, ClientError> {
    let Some(cv_data) = state.pending.import().await? else {
        return Ok(Landing::Home);
    };

    let response = state
        .api
        .save_imported(&cv_data)
        .await
        .map_err(ClientError::save)?;
    state.pending.clear_import().await?;

    match response.job_id {
        Some(job_id) => Ok(Landing::Editor(job_id)),
        None => Err(ClientError::Import(
            "save-imported-cv returned no job_id".to_string(),
        )),
    }
}

/// `None` for anonymous visitors.
pub async fn current_user(state: &AppState) -> Result<Option<UserProfile>, ClientError> {
    match state.api.current_user().await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.status() == Some(401) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(state: &AppState) -> Result<(), ClientError> {
    state.credentials.clear().await?;
    info!("signed out");
    Ok(())
}
