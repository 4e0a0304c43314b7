//! HTTP handlers for display preferences.
//!
//! Responses carry the full `Preferences` plus the root font size in
//! pixels, which is all a page needs to restyle itself.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::application::PreferencesService;
use crate::domain::preferences::Preferences;

#[derive(Clone)]
pub struct PreferencesHandlers {
    service: Arc<PreferencesService>,
}

impl PreferencesHandlers {
    pub fn new(service: Arc<PreferencesService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    #[serde(flatten)]
    pub preferences: Preferences,
    pub font_size_px: u8,
}

impl From<Preferences> for PreferencesResponse {
    fn from(preferences: Preferences) -> Self {
        Self {
            font_size_px: preferences.font_size.pixels(),
            preferences,
        }
    }
}

/// GET /api/preferences
pub async fn get_preferences(State(handlers): State<PreferencesHandlers>) -> impl IntoResponse {
    let prefs = handlers.service.load().await;
    (StatusCode::OK, Json(PreferencesResponse::from(prefs)))
}

/// POST /api/preferences/theme/toggle
pub async fn toggle_theme(State(handlers): State<PreferencesHandlers>) -> impl IntoResponse {
    let prefs = handlers.service.toggle_theme().await;
    (StatusCode::OK, Json(PreferencesResponse::from(prefs)))
}

/// POST /api/preferences/font-size/increase
pub async fn increase_font_size(State(handlers): State<PreferencesHandlers>) -> impl IntoResponse {
    let prefs = handlers.service.increase_font_size().await;
    (StatusCode::OK, Json(PreferencesResponse::from(prefs)))
}

/// POST /api/preferences/font-size/decrease
pub async fn decrease_font_size(State(handlers): State<PreferencesHandlers>) -> impl IntoResponse {
    let prefs = handlers.service.decrease_font_size().await;
    (StatusCode::OK, Json(PreferencesResponse::from(prefs)))
}
