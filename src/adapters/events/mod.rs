//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus with event capture
//! - `StepChangeLogger` - Handler that logs wizard transitions

mod in_memory;
mod step_change_logger;

pub use in_memory::InMemoryEventBus;
pub use step_change_logger::{StepChangeLogger, STEP_CHANGED};
