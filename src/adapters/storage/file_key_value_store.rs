//! File-based Key-Value Store Adapter
//!
//! Keeps every key in one pretty-printed JSON object on disk. Writes go to
//! a sibling temporary file first and are renamed into place, so a crash
//! mid-write leaves the previous contents intact.

use async_trait::async_trait;
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{KeyValueStore, StorageError};

#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store backed by `path`. The file is created on first write.
    ///
    /// ```ignore
    /// let store = FileKeyValueStore::new("./data/values-compass.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, JsonValue>, StorageError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StorageError::io(e.to_string())),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<JsonValue>(&raw) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::unavailable(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StorageError::unavailable(format!(
                "{} is not valid JSON: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn persist(&self, map: &Map<String, JsonValue>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::io(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(map).map_err(|e| {
            StorageError::SerializationFailed {
                key: "*".to_string(),
                reason: e.to_string(),
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| StorageError::io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::io(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: JsonValue) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), value);
        self.persist(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::storage_keys;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("store.json"));

        assert_eq!(store.get(storage_keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn values_survive_a_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileKeyValueStore::new(&path);
        store
            .set(storage_keys::FONT_SIZE, json!("large"))
            .await
            .unwrap();
        store.set(storage_keys::AUTH, json!(true)).await.unwrap();
        drop(store);

        let reopened = FileKeyValueStore::new(&path);
        assert_eq!(
            reopened.get(storage_keys::FONT_SIZE).await.unwrap(),
            Some(json!("large"))
        );
        assert_eq!(reopened.get(storage_keys::AUTH).await.unwrap(), Some(json!(true)));
    }

    #[tokio::test]
    async fn remove_deletes_only_that_key() {
        let dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("store.json"));
        store.set("a", json!(1)).await.unwrap();
        store.set("b", json!(2)).await.unwrap();

        store.remove("a").await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn corrupt_file_reports_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FileKeyValueStore::new(&path);
        assert!(matches!(
            store.get("a").await,
            Err(StorageError::Unavailable(_))
        ));
    }
}
