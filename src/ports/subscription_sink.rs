//! Subscription Sink Port - where newsletter sign-ups go.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::newsletter::EmailAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Subscription sink failed: {0}")]
pub struct SinkError(pub String);

/// Port for recording newsletter subscriptions.
#[async_trait]
pub trait SubscriptionSink: Send + Sync {
    async fn subscribe(&self, email: &EmailAddress) -> Result<SubscriptionOutcome, SinkError>;
}
