//! In-memory event bus.
//!
//! Delivers events to subscribed handlers in-process, in subscription
//! order, and keeps a bounded window of recently published envelopes so
//! tests and diagnostics can inspect the stream.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-process event bus.
///
/// Features:
/// - Sequential delivery (deterministic ordering)
/// - Capture of the most recent events for assertions (oldest dropped first)
/// - One failing handler does not stop delivery to the others
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe(STEP_CHANGED, Arc::new(StepChangeLogger));
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("assessment.step_changed.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<VecDeque<EventEnvelope>>,
    capacity: usize,
}

const DEFAULT_CAPACITY: usize = 256;

// A panicking handler must not take the bus down with it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Retains at most `capacity` envelopes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Returns the retained events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        read(&self.published).iter().cloned().collect()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        read(&self.published)
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        read(&self.published)
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        write(&self.published).clear();
    }

    pub fn event_count(&self) -> usize {
        read(&self.published).len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        read(&self.published)
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        {
            let mut published = write(&self.published);
            if published.len() == self.capacity {
                published.pop_front();
            }
            published.push_back(event.clone());
        }

        // Clone handlers to release lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = read(&self.handlers)
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        write(&self.handlers)
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = write(&self.handlers);
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Assessment", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    struct FailingHandler;

    #[async_trait]
    impl EventHandler for FailingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
        }

        fn name(&self) -> &'static str {
            "FailingHandler"
        }
    }

    #[tokio::test]
    async fn publish_records_event() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("assessment.step_changed.v1", "a-1"))
            .await
            .unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("assessment.step_changed.v1"));
    }

    #[tokio::test]
    async fn filters_by_type_and_aggregate() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("type.a", "agg-1")).await.unwrap();
        bus.publish(envelope("type.b", "agg-2")).await.unwrap();
        bus.publish(envelope("type.a", "agg-2")).await.unwrap();

        assert_eq!(bus.events_of_type("type.a").len(), 2);
        assert_eq!(bus.events_for_aggregate("agg-2").len(), 2);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_multiple_types() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe_all(
            &["type.a", "type.b"],
            Arc::new(CountingHandler(counter.clone())),
        );

        bus.publish(envelope("type.a", "1")).await.unwrap();
        bus.publish(envelope("type.b", "1")).await.unwrap();
        bus.publish(envelope("type.c", "1")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_handler_does_not_block_others() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("type.a", Arc::new(FailingHandler));
        bus.subscribe("type.a", Arc::new(CountingHandler(counter.clone())));

        let result = bus.publish(envelope("type.a", "1")).await;

        assert!(result.unwrap_err().message.contains("FailingHandler"));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retention_is_bounded() {
        let bus = InMemoryEventBus::with_capacity(2);
        for aggregate in ["1", "2", "3", "4"] {
            bus.publish(envelope("type.a", aggregate)).await.unwrap();
        }

        assert_eq!(bus.event_count(), 2);
        let kept: Vec<String> = bus
            .published_events()
            .into_iter()
            .map(|e| e.aggregate_id)
            .collect();
        assert_eq!(kept, vec!["3", "4"]);
    }

    #[tokio::test]
    async fn clear_removes_recorded_events() {
        let bus = InMemoryEventBus::new();
        bus.publish_all(vec![envelope("type.a", "1"), envelope("type.b", "2")])
            .await
            .unwrap();
        assert_eq!(bus.event_count(), 2);

        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }
}
