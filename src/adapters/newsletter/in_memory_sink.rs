//! In-memory newsletter subscription sink.

use async_trait::async_trait;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

use crate::domain::newsletter::EmailAddress;
use crate::ports::{SinkError, SubscriptionOutcome, SubscriptionSink};

/// Collects subscribed addresses. Resubscribing is not an error.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionSink {
    emails: RwLock<BTreeSet<EmailAddress>>,
}

impl InMemorySubscriptionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribers(&self) -> Vec<EmailAddress> {
        self.emails.read().await.iter().cloned().collect()
    }
}

#[async_trait]
impl SubscriptionSink for InMemorySubscriptionSink {
    async fn subscribe(&self, email: &EmailAddress) -> Result<SubscriptionOutcome, SinkError> {
        if self.emails.write().await.insert(email.clone()) {
            tracing::info!("Newsletter subscription recorded");
            Ok(SubscriptionOutcome::Subscribed)
        } else {
            Ok(SubscriptionOutcome::AlreadySubscribed)
        }
    }
}
