//! SubscribeToNewsletterHandler - validates the address and hands it to the sink.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::newsletter::EmailAddress;
use crate::ports::{storage_keys, KeyValueStore, SinkError, SubscriptionOutcome, SubscriptionSink};

/// Command to subscribe an address. The address is raw user input.
#[derive(Debug, Clone)]
pub struct SubscribeToNewsletterCommand {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeToNewsletterResult {
    pub email: EmailAddress,
    pub outcome: SubscriptionOutcome,
}

impl SubscribeToNewsletterResult {
    pub fn message(&self) -> &'static str {
        match self.outcome {
            SubscriptionOutcome::Subscribed => "Thanks for subscribing!",
            SubscriptionOutcome::AlreadySubscribed => "You're already subscribed.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsletterError {
    #[error("{0}")]
    InvalidEmail(#[from] ValidationError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub struct SubscribeToNewsletterHandler {
    sink: Arc<dyn SubscriptionSink>,
    store: Arc<dyn KeyValueStore>,
}

impl SubscribeToNewsletterHandler {
    pub fn new(sink: Arc<dyn SubscriptionSink>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { sink, store }
    }

    pub async fn handle(
        &self,
        cmd: SubscribeToNewsletterCommand,
    ) -> Result<SubscribeToNewsletterResult, NewsletterError> {
        let email = EmailAddress::parse(&cmd.email)?;
        let outcome = self.sink.subscribe(&email).await?;

        // Best effort: the subscription itself already succeeded.
        if let Err(e) = self
            .store
            .set(storage_keys::NEWSLETTER_SUBSCRIBED, serde_json::Value::Bool(true))
            .await
        {
            tracing::warn!(error = %e, "Could not remember newsletter subscription");
        }

        tracing::debug!(?outcome, "Newsletter subscribe handled");
        Ok(SubscribeToNewsletterResult { email, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::newsletter::InMemorySubscriptionSink;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use async_trait::async_trait;

    struct FailingSink;

    #[async_trait]
    impl SubscriptionSink for FailingSink {
        async fn subscribe(&self, _email: &EmailAddress) -> Result<SubscriptionOutcome, SinkError> {
            Err(SinkError("list provider offline".to_string()))
        }
    }

    fn handler(store: &InMemoryKeyValueStore) -> SubscribeToNewsletterHandler {
        SubscribeToNewsletterHandler::new(
            Arc::new(InMemorySubscriptionSink::new()),
            Arc::new(store.clone()),
        )
    }

    fn cmd(email: &str) -> SubscribeToNewsletterCommand {
        SubscribeToNewsletterCommand {
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn subscribes_and_sets_flag() {
        let store = InMemoryKeyValueStore::new();
        let handler = handler(&store);

        let result = handler.handle(cmd(" Reader@Example.com ")).await.unwrap();

        assert_eq!(result.email.as_str(), "reader@example.com");
        assert_eq!(result.outcome, SubscriptionOutcome::Subscribed);
        assert_eq!(
            store.get(storage_keys::NEWSLETTER_SUBSCRIBED).await.unwrap(),
            Some(serde_json::Value::Bool(true))
        );
    }

    #[tokio::test]
    async fn repeat_subscription_is_reported() {
        let store = InMemoryKeyValueStore::new();
        let handler = handler(&store);

        handler.handle(cmd("reader@example.com")).await.unwrap();
        let again = handler.handle(cmd("READER@example.com")).await.unwrap();

        assert_eq!(again.outcome, SubscriptionOutcome::AlreadySubscribed);
        assert_eq!(again.message(), "You're already subscribed.");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let store = InMemoryKeyValueStore::new();
        let err = handler(&store).handle(cmd("not-an-email")).await.unwrap_err();
        assert!(matches!(err, NewsletterError::InvalidEmail(_)));
        assert_eq!(store.get(storage_keys::NEWSLETTER_SUBSCRIBED).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sink_failure_propagates() {
        let store = InMemoryKeyValueStore::new();
        let handler = SubscribeToNewsletterHandler::new(Arc::new(FailingSink), Arc::new(store));
        let err = handler.handle(cmd("reader@example.com")).await.unwrap_err();
        assert!(matches!(err, NewsletterError::Sink(_)));
    }

    #[tokio::test]
    async fn flag_failure_does_not_fail_subscription() {
        let store = InMemoryKeyValueStore::new();
        store.set_unavailable(true);
        let result = handler(&store).handle(cmd("reader@example.com")).await;
        assert!(result.is_ok());
    }
}
