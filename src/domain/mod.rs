//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, events, state machines)
//! - `catalog` - The fixed list of values users choose from
//! - `assessment` - Wizard steps, session aggregate and step views
//! - `results` - Pure assembly of the final summary
//! - `export` - Export dialog view-model, formats and Markdown composition
//! - `preferences` - Theme and font-size settings
//! - `account` - Locally remembered visitor profile
//! - `newsletter` - Email value object for the subscription stub
//! - `announcement` - Live-region messages

pub mod account;
pub mod announcement;
pub mod assessment;
pub mod catalog;
pub mod export;
pub mod foundation;
pub mod newsletter;
pub mod preferences;
pub mod results;
