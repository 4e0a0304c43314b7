//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the assessment domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId, SerializableDomainEvent};
pub use ids::{AssessmentId, ValueId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
