//! Where the API client gets its token from.
//!
//! The client never reads storage itself. It asks an injected provider and
//! calls `clear` when the backend rejects the token.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::storage::{LocalStorage, StorageError};

pub const TOKEN_KEY: &str = "auth_token";

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn token(&self) -> Option<String>;

    async fn store(&self, token: &str) -> Result<(), StorageError>;

    async fn clear(&self) -> Result<(), StorageError>;
}

/// Token held for the lifetime of the process.
#[derive(Default)]
pub struct MemoryCredentials {
    token: RwLock<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialProvider for MemoryCredentials {
    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store(&self, token: &str) -> Result<(), StorageError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Token persisted under `auth_token` in the shared storage file.
pub struct FileCredentials {
    storage: Arc<LocalStorage>,
}

impl FileCredentials {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl CredentialProvider for FileCredentials {
    async fn token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("could not read stored token: {e}");
                None
            }
        }
    }

    async fn store(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_credentials() {
        let creds = MemoryCredentials::new();
        assert_eq!(creds.token().await, None);
        creds.store("abc").await.unwrap();
        assert_eq!(creds.token().await.as_deref(), Some("abc"));
        creds.clear().await.unwrap();
        assert_eq!(creds.token().await, None);
    }

    #[tokio::test]
    async fn test_file_credentials_share_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::in_dir(dir.path()));
        let creds = FileCredentials::new(storage.clone());

        creds.store("tok-1").await.unwrap();
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok-1"));

        let again = FileCredentials::new(Arc::new(LocalStorage::in_dir(dir.path())));
        assert_eq!(again.token().await.as_deref(), Some("tok-1"));

        again.clear().await.unwrap();
        assert_eq!(creds.token().await, None);
    }
}
