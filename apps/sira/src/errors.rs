use thiserror::Error;

use crate::api_client::ApiError;
use crate::auth::StorageError;

pub const MSG_LOGIN_REQUIRED: &str = "يرجى تسجيل الدخول لحفظ سيرتك الذاتية وإكمال التعديل.";
pub const MSG_RATE_LIMITED: &str = "لقد تجاوزت الحد اليومي المسموح به لإنشاء السير الذاتية.";
pub const MSG_UNEXPECTED: &str = "حدث خطأ غير متوقع أثناء المعالجة. حاول مرة أخرى.";
pub const MSG_IMPORT_FAILED: &str = "فشل تحليل الملف. تأكد أن الملف نصي وليس صورة ممسوحة ضوئياً.";
pub const MSG_SAVE_FAILED: &str = "حدث خطأ أثناء الحفظ";
pub const MSG_NOT_FOUND: &str = "عذراً، لم نتمكن من العثور على السيرة الذاتية المطلوبة.";
pub const MSG_STORAGE: &str = "تعذر الوصول إلى بيانات الجلسة المحفوظة.";

/// Client-level error. Every variant degrades to a message the user sees;
/// none of them is fatal.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Caught before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized { redirect_to_login: bool },

    #[error("Rate limited")]
    RateLimited(Option<String>),

    #[error("Server error: {0}")]
    Server(#[source] ApiError),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Save failed: {0}")]
    Save(#[source] ApiError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// A failed save. Authentication failures keep their own variant.
    pub fn save(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => err.into(),
            other => ClientError::Save(other),
        }
    }

    /// A failed upload or extraction.
    pub fn import(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } | ApiError::RateLimited { .. } => err.into(),
            other => ClientError::Import(other.to_string()),
        }
    }

    pub fn redirects_to_login(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized {
                redirect_to_login: true
            }
        )
    }

    /// What the UI shows for this error. Backend-provided text wins over the
    /// generic fallback where the backend sent any.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Unauthorized { .. } => MSG_LOGIN_REQUIRED.to_string(),
            ClientError::RateLimited(_) => MSG_RATE_LIMITED.to_string(),
            ClientError::Server(err) => err
                .server_message()
                .unwrap_or(MSG_UNEXPECTED)
                .to_string(),
            ClientError::Import(_) => MSG_IMPORT_FAILED.to_string(),
            ClientError::Save(_) => MSG_SAVE_FAILED.to_string(),
            ClientError::NotFound(_) => MSG_NOT_FOUND.to_string(),
            ClientError::Storage(_) => MSG_STORAGE.to_string(),
        }
    }
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { redirect_to_login } => {
                ClientError::Unauthorized { redirect_to_login }
            }
            ApiError::RateLimited { message } => ClientError::RateLimited(message),
            ApiError::Server { status: 404, .. } => ClientError::NotFound(err.to_string()),
            other => ClientError::Server(other),
        }
    }
}
