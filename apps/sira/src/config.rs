use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

use crate::api_client::DEFAULT_API_URL;
use crate::auth::storage::app_data_root;
use crate::errors::ClientError;

const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const GOOGLE_LOGIN_PATH: &str = "/accounts/google/login/";

pub const MSG_SOCIAL_LOGIN_DISABLED: &str =
    "تسجيل الدخول عبر Google غير مفعّل. عيّن SIRA_OAUTH_CLIENT_ID.";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub oauth_client_id: Option<String>,
    pub data_dir: PathBuf,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Language tag sent with generation requests.
    pub language: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            api_url: non_empty("SIRA_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            oauth_client_id: non_empty("SIRA_OAUTH_CLIENT_ID"),
            data_dir: non_empty("SIRA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(app_data_root),
            poll_interval: Duration::from_millis(parse_or(
                "SIRA_POLL_INTERVAL_MS",
                non_empty("SIRA_POLL_INTERVAL_MS"),
                DEFAULT_POLL_INTERVAL_MS,
            )?),
            request_timeout: Duration::from_secs(parse_or(
                "SIRA_REQUEST_TIMEOUT_SECS",
                non_empty("SIRA_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            language: non_empty("SIRA_LANGUAGE").unwrap_or_else(|| "ar".to_string()),
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The social-login URL, offered only when an OAuth client is configured.
    pub fn social_login_url(&self) -> Result<String, ClientError> {
        if self.oauth_client_id.is_none() {
            return Err(ClientError::Validation(
                MSG_SOCIAL_LOGIN_DISABLED.to_string(),
            ));
        }
        Ok(self.oauth_login_url())
    }

    /// Social-login entry point: scheme and host of the API URL plus the
    /// provider path.
    pub fn oauth_login_url(&self) -> String {
        match Url::parse(&self.api_url) {
            Ok(url) => {
                let host = url.host_str().unwrap_or("localhost");
                match url.port() {
                    Some(port) => format!("{}://{host}:{port}{GOOGLE_LOGIN_PATH}", url.scheme()),
                    None => format!("{}://{host}{GOOGLE_LOGIN_PATH}", url.scheme()),
                }
            }
            Err(e) => {
                tracing::warn!("invalid API URL {}: {e}", self.api_url);
                format!("http://localhost:8000{GOOGLE_LOGIN_PATH}")
            }
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a number, got '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SIRA_DATA_DIR", "/tmp/sira")]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.language, "ar");
        assert_eq!(config.oauth_client_id, None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/sira"));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = load(&[
            ("SIRA_API_URL", "https://api.sira.example/api/"),
            ("SIRA_POLL_INTERVAL_MS", "500"),
            ("SIRA_OAUTH_CLIENT_ID", "client-123"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://api.sira.example/api");
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.oauth_client_id.as_deref(), Some("client-123"));
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = load(&[("SIRA_REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SIRA_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_oauth_url_uses_api_root() {
        let config = load(&[("SIRA_API_URL", "http://127.0.0.1:8000/api")]).unwrap();
        assert_eq!(
            config.oauth_login_url(),
            "http://127.0.0.1:8000/accounts/google/login/"
        );
        let config = load(&[("SIRA_API_URL", "https://sira.example/api/v1")]).unwrap();
        assert_eq!(
            config.oauth_login_url(),
            "https://sira.example/accounts/google/login/"
        );
    }

    #[test]
    fn test_social_login_requires_client_id() {
        let config = load(&[("SIRA_API_URL", "http://127.0.0.1:8000/api")]).unwrap();
        let err = config.social_login_url().unwrap_err();
        assert_eq!(err.user_message(), MSG_SOCIAL_LOGIN_DISABLED);

        let config = load(&[
            ("SIRA_API_URL", "http://127.0.0.1:8000/api"),
            ("SIRA_OAUTH_CLIENT_ID", "client-123"),
        ])
        .unwrap();
        assert_eq!(
            config.social_login_url().unwrap(),
            "http://127.0.0.1:8000/accounts/google/login/"
        );
    }
}
