//! Authentication Capability Port.
//!
//! The application only needs to know whether a visitor is signed in and
//! to be told when that changes. This is a stub interface for gating
//! premium features; it is not a security boundary.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::account::UserProfile;

/// Callback invoked with the new authentication state.
pub type AuthCallback = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The capability did not become ready within the allowed time.
    #[error("Authentication was not ready after {waited_ms} ms")]
    NotReady { waited_ms: u64 },

    #[error("Authentication storage failed: {0}")]
    Storage(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Port for the external authentication capability.
///
/// # Contract
///
/// - Calls made before the capability is ready wait for readiness and
///   fail with `AuthError::NotReady` once the configured timeout expires
/// - `subscribe` callbacks run after every sign-in and sign-out
#[async_trait]
pub trait AuthCapability: Send + Sync {
    async fn is_authenticated(&self) -> Result<bool, AuthError>;

    async fn current_user(&self) -> Result<Option<UserProfile>, AuthError>;

    fn subscribe(&self, callback: AuthCallback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AuthCapability) {}

    #[test]
    fn not_ready_reports_wait() {
        let err = AuthError::NotReady { waited_ms: 250 };
        assert_eq!(err.to_string(), "Authentication was not ready after 250 ms");
    }
}
