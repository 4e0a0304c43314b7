//! SessionStore - saves and restores an assessment through the key-value store.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::ports::{storage_keys, KeyValueStore, KeyValueStoreExt};

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    /// Store for the visitor's single saved assessment.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, storage_keys::ASSESSMENT)
    }

    /// Store under a custom key, for hosting several assessments side by side.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn load(&self) -> Result<Option<AssessmentSession>, AssessmentError> {
        self.store
            .get_as::<AssessmentSession>(&self.key)
            .await
            .map_err(|e| AssessmentError::PersistenceUnavailable(e.to_string()))
    }

    pub async fn save(&self, session: &AssessmentSession) -> Result<(), AssessmentError> {
        self.store
            .set_as(&self.key, session)
            .await
            .map_err(|e| AssessmentError::PersistenceUnavailable(e.to_string()))
    }

    pub async fn clear(&self) -> Result<(), AssessmentError> {
        self.store
            .remove(&self.key)
            .await
            .map_err(|e| AssessmentError::PersistenceUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::assessment::WizardSettings;
    use crate::domain::catalog::ValuesCatalog;
    use crate::domain::foundation::ValueId;

    #[tokio::test]
    async fn saved_session_loads_equal() {
        let catalog = ValuesCatalog::builtin().unwrap();
        let settings = WizardSettings::new(1, 100);
        let mut session = AssessmentSession::new(true);
        session.advance(&catalog, &settings).unwrap();
        session
            .select(&catalog, &ValueId::new("honesty").unwrap())
            .unwrap();
        session.advance(&catalog, &settings).unwrap();

        let store = SessionStore::new(Arc::new(InMemoryKeyValueStore::new()));
        store.save(&session).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn clear_removes_saved_session() {
        let store = SessionStore::new(Arc::new(InMemoryKeyValueStore::new()));
        store.save(&AssessmentSession::new(false)).await.unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn storage_failure_maps_to_persistence_unavailable() {
        let backing = InMemoryKeyValueStore::new();
        backing.set_unavailable(true);
        let store = SessionStore::new(Arc::new(backing));

        assert!(matches!(
            store.save(&AssessmentSession::new(false)).await,
            Err(AssessmentError::PersistenceUnavailable(_))
        ));
    }
}
