//! Authentication adapters.
//!
//! - `LocalFlagAuth` - Signed-in flag in the key-value store
//! - `AuthReadiness` - One-shot readiness handshake with bounded waits

mod local_flag;

pub use local_flag::{AuthReadiness, LocalFlagAuth};
