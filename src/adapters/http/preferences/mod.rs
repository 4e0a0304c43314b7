//! HTTP adapter for display preferences.

mod handlers;
mod routes;

pub use handlers::PreferencesHandlers;
pub use routes::preferences_routes;
