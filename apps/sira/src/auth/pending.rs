use std::sync::Arc;

use super::storage::{LocalStorage, StorageError};

const PENDING_PROMPT_KEY: &str = "pending_cv_prompt";
const PENDING_IMPORT_KEY: &str = "pending_cv_data";

/// Work a visitor started before logging in.
#[derive(Clone)]
pub struct PendingStore {
    storage: Arc<LocalStorage>,
}

impl PendingStore {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    pub async fn prompt(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get(PENDING_PROMPT_KEY)
            .await?
            .filter(|p| !p.trim().is_empty()))
    }

    pub async fn set_prompt(&self, prompt: &str) -> Result<(), StorageError> {
        self.storage.set(PENDING_PROMPT_KEY, prompt).await
    }

    pub async fn clear_prompt(&self) -> Result<(), StorageError> {
        self.storage.remove(PENDING_PROMPT_KEY).await
    }

    /// Parsed CV data from an import that still has to be saved.
    pub async fn import(&self) -> Result<Option<serde_json::Value>, StorageError> {
        let Some(raw) = self.storage.get(PENDING_IMPORT_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("discarding unreadable pending import: {e}");
                self.storage.remove(PENDING_IMPORT_KEY).await?;
                Ok(None)
            }
        }
    }

    pub async fn set_import(&self, cv_data: &serde_json::Value) -> Result<(), StorageError> {
        self.storage
            .set(PENDING_IMPORT_KEY, &cv_data.to_string())
            .await
    }

    pub async fn clear_import(&self) -> Result<(), StorageError> {
        self.storage.remove(PENDING_IMPORT_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_prompt_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let pending = PendingStore::new(Arc::new(LocalStorage::in_dir(dir.path())));
        assert_eq!(pending.prompt().await.unwrap(), None);
        pending.set_prompt("مهندس برمجيات").await.unwrap();
        assert_eq!(pending.prompt().await.unwrap().as_deref(), Some("مهندس برمجيات"));
        pending.clear_prompt().await.unwrap();
        assert_eq!(pending.prompt().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreadable_import_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::in_dir(dir.path()));
        storage.set(PENDING_IMPORT_KEY, "{broken").await.unwrap();
        let pending = PendingStore::new(storage.clone());
        assert_eq!(pending.import().await.unwrap(), None);
        assert_eq!(storage.get(PENDING_IMPORT_KEY).await.unwrap(), None);

        pending.set_import(&json!({ "full_name": "x" })).await.unwrap();
        assert_eq!(
            pending.import().await.unwrap(),
            Some(json!({ "full_name": "x" }))
        );
    }
}
