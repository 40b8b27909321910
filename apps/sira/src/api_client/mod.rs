//! HTTP adapter for the résumé backend.
//!
//! Every request goes through [`ApiClient`]. It appends the trailing slash
//! the backend routes expect, attaches the token from the injected
//! [`CredentialProvider`] and applies the 401 policy: a rejected "who am I"
//! check fails quietly, any other 401 clears the stored token and asks the
//! caller to send the user to the login page.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::CredentialProvider;

pub mod endpoints;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Paths containing this marker are exempt from the logout-on-401 policy.
const WHOAMI_PATH: &str = "users/me";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication required")]
    Unauthorized { redirect_to_login: bool },

    #[error("rate limited")]
    RateLimited { message: Option<String> },

    #[error("server returned {status}: {body}")]
    Server {
        status: u16,
        message: Option<String>,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Json(_) => None,
        }
    }

    /// The `error`/`detail` text the backend put in the response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::RateLimited { message } | ApiError::Server { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// `base_url` is like `http://localhost:8000/api`; a trailing slash is trimmed.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, normalize_path(path))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, |req| req).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, |req| req.json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let response = self
            .send(Method::POST, path, |req| req.multipart(form))
            .await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, |req| req).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response, ApiError> {
        let path = normalize_path(path);
        debug!(method = %method, path = %path, "api request");

        let mut request = self
            .client
            .request(method, format!("{}/{}", self.base_url, path));
        if let Some(token) = self.credentials.token().await {
            request = request.header(AUTHORIZATION, format!("Token {token}"));
        }

        let response = build(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        match status {
            StatusCode::UNAUTHORIZED => Err(self.unauthorized(&path).await),
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(path = %path, "rate limited by backend");
                Err(ApiError::RateLimited { message })
            }
            _ => {
                warn!(path = %path, status = status.as_u16(), "api request failed");
                Err(ApiError::Server {
                    status: status.as_u16(),
                    message,
                    body,
                })
            }
        }
    }

    async fn unauthorized(&self, path: &str) -> ApiError {
        if path.contains(WHOAMI_PATH) {
            debug!("anonymous session, user check rejected");
            return ApiError::Unauthorized {
                redirect_to_login: false,
            };
        }

        info!(path = %path, "token rejected, clearing stored credentials");
        if let Err(e) = self.credentials.clear().await {
            warn!("failed to clear credentials: {e}");
        }
        ApiError::Unauthorized {
            redirect_to_login: true,
        }
    }
}

/// Strips the leading slash and appends a trailing one unless the path
/// already has one or carries a query string.
pub fn normalize_path(path: &str) -> String {
    let mut path = path.trim_start_matches('/').to_string();
    if !path.ends_with('/') && !path.contains('?') {
        path.push('/');
    }
    path
}

/// Pulls a human-readable message out of a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .or_else(|| {
            value
                .get("non_field_errors")
                .and_then(|v| v.get(0))
                .and_then(|v| v.as_str())
        })
        .map(str::to_string)
}
