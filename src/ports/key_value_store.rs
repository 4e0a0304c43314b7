//! Key-Value Store Port - the persistence bridge.
//!
//! Everything the application remembers between visits goes through this
//! port as JSON values under fixed string keys. Callers treat writes as
//! fire-and-forget: a failure is reported, never fatal.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Keys used by the application.
pub mod storage_keys {
    /// Local authentication flag (bool).
    pub const AUTH: &str = "valuesCompass.auth";
    /// Serialized `UserProfile`.
    pub const USER: &str = "valuesCompass.user";
    pub const THEME: &str = "valuesCompass.theme";
    pub const FONT_SIZE: &str = "valuesCompass.fontSize";
    /// Whether the visitor already subscribed to the newsletter (bool).
    pub const NEWSLETTER_SUBSCRIBED: &str = "valuesCompass.newsletterSubscribed";
    /// Serialized `AssessmentSession`.
    pub const ASSESSMENT: &str = "valuesCompass.assessment";
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store cannot be used at all (disabled, quota exceeded, unwritable).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize value for '{key}': {reason}")]
    SerializationFailed { key: String, reason: String },

    #[error("Stored value for '{key}' is not readable: {reason}")]
    DeserializationFailed { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(String),
}

impl StorageError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

/// Port for the key-value persistence bridge.
///
/// # Contract
///
/// - `get` of a missing key is `Ok(None)`, not an error
/// - `set` replaces any previous value
/// - `remove` of a missing key succeeds
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StorageError>;

    async fn set(&self, key: &str, value: JsonValue) -> Result<(), StorageError>;

    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed helpers over any `KeyValueStore`.
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    async fn get_as<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                StorageError::DeserializationFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            }),
        }
    }

    async fn set_as<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let json = serde_json::to_value(value).map_err(|e| StorageError::SerializationFailed {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        self.set(key, json).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
