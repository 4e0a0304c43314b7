//! Local-flag authentication.
//!
//! "Signed in" is a boolean kept in the key-value store next to a profile
//! blob. There is no server verification; this only gates premium
//! features in a single-visitor setup.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;

use crate::domain::account::UserProfile;
use crate::ports::{
    storage_keys, AuthCallback, AuthCapability, AuthError, KeyValueStore, KeyValueStoreExt,
    StorageError,
};

/// One-shot readiness signal.
///
/// Waiters block until `mark_ready` is called or their timeout expires;
/// once ready, the signal never resets.
#[derive(Debug, Clone)]
pub struct AuthReadiness {
    tx: Arc<watch::Sender<bool>>,
}

impl AuthReadiness {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<(), AuthError> {
        let mut rx = self.tx.subscribe();
        let wait = async move {
            loop {
                let ready = *rx.borrow_and_update();
                if ready {
                    return true;
                }
                if rx.changed().await.is_err() {
                    return false;
                }
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => {
                let waited_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(waited_ms, "Authentication capability not ready");
                Err(AuthError::NotReady { waited_ms })
            }
        }
    }
}

impl Default for AuthReadiness {
    fn default() -> Self {
        Self::new()
    }
}

/// `AuthCapability` backed by the key-value store.
pub struct LocalFlagAuth {
    store: Arc<dyn KeyValueStore>,
    readiness: AuthReadiness,
    ready_timeout: Duration,
    subscribers: RwLock<Vec<AuthCallback>>,
}

impl LocalFlagAuth {
    /// Creates a capability that is not ready until `initialize` runs.
    pub fn new(store: Arc<dyn KeyValueStore>, ready_timeout: Duration) -> Self {
        Self {
            store,
            readiness: AuthReadiness::new(),
            ready_timeout,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn readiness(&self) -> &AuthReadiness {
        &self.readiness
    }

    /// Probes the store and signals readiness.
    ///
    /// An unreadable store still yields a ready capability that reports
    /// "signed out".
    pub async fn initialize(&self) {
        if let Err(e) = self.store.get(storage_keys::AUTH).await {
            tracing::warn!(error = %e, "Auth flag unreadable; continuing signed out");
        }
        self.readiness.mark_ready();
        tracing::debug!("Authentication capability ready");
    }

    pub async fn sign_in(&self, profile: UserProfile) -> Result<(), AuthError> {
        self.readiness.wait_ready(self.ready_timeout).await?;
        self.store
            .set_as(storage_keys::USER, &profile)
            .await
            .map_err(storage_error)?;
        self.store
            .set_as(storage_keys::AUTH, &true)
            .await
            .map_err(storage_error)?;
        tracing::info!(premium = profile.is_premium, "Visitor signed in");
        self.notify(true);
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.readiness.wait_ready(self.ready_timeout).await?;
        self.store
            .set_as(storage_keys::AUTH, &false)
            .await
            .map_err(storage_error)?;
        self.store
            .remove(storage_keys::USER)
            .await
            .map_err(storage_error)?;
        tracing::info!("Visitor signed out");
        self.notify(false);
        Ok(())
    }

    fn notify(&self, authenticated: bool) {
        let callbacks: Vec<AuthCallback> = self
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for callback in callbacks {
            callback(authenticated);
        }
    }
}

fn storage_error(e: StorageError) -> AuthError {
    AuthError::Storage(e.to_string())
}

#[async_trait]
impl AuthCapability for LocalFlagAuth {
    async fn is_authenticated(&self) -> Result<bool, AuthError> {
        self.readiness.wait_ready(self.ready_timeout).await?;
        let flag = self
            .store
            .get_as::<bool>(storage_keys::AUTH)
            .await
            .map_err(storage_error)?;
        Ok(flag.unwrap_or(false))
    }

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        if !self.is_authenticated().await? {
            return Ok(None);
        }
        self.store
            .get_as::<UserProfile>(storage_keys::USER)
            .await
            .map_err(|e| AuthError::InvalidProfile(e.to_string()))
    }

    fn subscribe(&self, callback: AuthCallback) {
        self.subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(callback);
    }
}
