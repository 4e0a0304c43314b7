//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in a map for the lifetime of the process. Used in tests
//! and when no storage file is configured.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{KeyValueStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, JsonValue>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail, as a disabled or full browser
    /// store would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("storage is disabled"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StorageError> {
        self.check_available()?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{storage_keys, KeyValueStoreExt};
    use serde_json::json;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = InMemoryKeyValueStore::new();

        store.set(storage_keys::THEME, json!("dark")).await.unwrap();
        assert_eq!(store.get(storage_keys::THEME).await.unwrap(), Some(json!("dark")));

        store.remove(storage_keys::THEME).await.unwrap();
        assert_eq!(store.get(storage_keys::THEME).await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_missing_key_succeeds() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.remove("valuesCompass.nothing").await.is_ok());
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = InMemoryKeyValueStore::new();
        store.set_unavailable(true);

        assert!(matches!(
            store.set(storage_keys::AUTH, json!(true)).await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(store.get(storage_keys::AUTH).await.is_err());
    }

    #[tokio::test]
    async fn typed_helpers_report_bad_shapes() {
        let store = InMemoryKeyValueStore::new();
        store.set(storage_keys::AUTH, json!("yes")).await.unwrap();

        let result = store.get_as::<bool>(storage_keys::AUTH).await;
        assert!(matches!(result, Err(StorageError::DeserializationFailed { .. })));

        store.set_as(storage_keys::AUTH, &true).await.unwrap();
        assert_eq!(store.get_as::<bool>(storage_keys::AUTH).await.unwrap(), Some(true));
    }
}
