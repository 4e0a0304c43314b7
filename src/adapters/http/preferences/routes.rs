//! HTTP routes for display preferences.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    decrease_font_size, get_preferences, increase_font_size, toggle_theme, PreferencesHandlers,
};

/// Creates the preferences router. Mount under `/api/preferences`.
pub fn preferences_routes(handlers: PreferencesHandlers) -> Router {
    Router::new()
        .route("/", get(get_preferences))
        .route("/theme/toggle", post(toggle_theme))
        .route("/font-size/increase", post(increase_font_size))
        .route("/font-size/decrease", post(decrease_font_size))
        .with_state(handlers)
}
