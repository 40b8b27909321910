use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api_client::ApiClient;
use crate::auth::{CredentialProvider, FileCredentials, LocalStorage, PendingStore};
use crate::config::Config;

/// Shared handles every flow and command works against.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub credentials: Arc<dyn CredentialProvider>,
    pub pending: PendingStore,
    pub config: Config,
}

impl AppState {
    /// Wires the file-backed credential provider and pending store under
    /// `config.data_dir`.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = Arc::new(LocalStorage::in_dir(&config.data_dir));
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(FileCredentials::new(storage.clone()));
        let api = ApiClient::new(
            &config.api_url,
            config.request_timeout,
            credentials.clone(),
        )
        .context("failed to build HTTP client")?;

        Ok(Self {
            api,
            credentials,
            pending: PendingStore::new(storage),
            config,
        })
    }
}
