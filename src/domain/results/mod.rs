//! Results module - the read-only summary shown at the end of the wizard.
//!
//! `assemble` is a pure function of the session and the catalog. The export
//! task and the results screen both consume its output.

mod assembler;
mod next_steps;
mod view;

pub use assembler::{assemble, NEXT_STEP_SOURCE_COUNT};
pub use next_steps::{closing_suggestion, suggestion_for};
pub use view::{CategoryCount, RankedValue, ResultsView};
