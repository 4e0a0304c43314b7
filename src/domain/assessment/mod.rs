//! Assessment module - the five-step values wizard.
//!
//! # Components
//!
//! - `WizardStep` - the step sequence and its transition rules
//! - `AssessmentSession` - aggregate holding selections, ranking, reflections
//! - `StepView` - what the renderer is given for the current step
//! - `UserIntent` - serializable user actions
//! - `StepChanged` - event published on every transition

mod errors;
mod events;
mod intent;
mod session;
mod settings;
mod step;
mod view;

pub use errors::AssessmentError;
pub use events::StepChanged;
pub use intent::UserIntent;
pub use session::{AssessmentSession, MoveOutcome, SelectionChange, StepTransition};
pub use settings::{WizardSettings, DEFAULT_MIN_SELECTION, DEFAULT_REFLECTION_MAX_CHARS};
pub use step::WizardStep;
pub use view::{ReflectionPrompt, RankedOption, SelectableValue, StepContent, StepView};
