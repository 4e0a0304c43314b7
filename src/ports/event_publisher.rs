//! EventPublisher port - Interface for publishing domain events.
//!
//! The wizard publishes step changes without knowing who listens or how
//! the events travel.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Every subscribed handler sees each published event at least once
/// - A failing handler does not prevent delivery to the others
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let envelope = StepChanged::from_transition(id, transition).to_envelope()?;
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[test]
    fn event_publisher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn EventPublisher>();
    }
}
