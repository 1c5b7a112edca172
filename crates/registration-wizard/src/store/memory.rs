//! In-memory key-value store.

use super::KeyValueStore;
use crate::error::WizardResult;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Store that keeps values for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> WizardResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> WizardResult<()> {
        debug!(key, "Memory store: set");
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> WizardResult<()> {
        debug!(key, "Memory store: remove");
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store.set("isPinSent", "true").await.unwrap();
        assert_eq!(store.get("isPinSent").await.unwrap(), Some("true".into()));
        assert_eq!(store.len().await, 1);

        store.remove("isPinSent").await.unwrap();
        assert!(store.get("isPinSent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").await.is_ok());
    }
}
