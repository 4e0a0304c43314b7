//! PreferencesService - theme and font size, remembered across visits.
//!
//! Each preference lives under its own storage key. Unreadable or missing
//! values fall back to the defaults; failed writes are logged and the new
//! value still applies for the current visit.

use std::sync::Arc;

use crate::domain::announcement::Announcement;
use crate::domain::preferences::{FontSize, Preferences, Theme};
use crate::ports::{storage_keys, Announcer, KeyValueStore, KeyValueStoreExt};

pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
    announcer: Arc<dyn Announcer>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn KeyValueStore>, announcer: Arc<dyn Announcer>) -> Self {
        Self { store, announcer }
    }

    pub async fn load(&self) -> Preferences {
        let theme = match self.store.get_as::<Theme>(storage_keys::THEME).await {
            Ok(theme) => theme.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read theme preference");
                Theme::default()
            }
        };
        let font_size = match self.store.get_as::<FontSize>(storage_keys::FONT_SIZE).await {
            Ok(size) => size.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read font size preference");
                FontSize::default()
            }
        };
        Preferences { theme, font_size }
    }

    pub async fn toggle_theme(&self) -> Preferences {
        let mut prefs = self.load().await;
        prefs.theme = prefs.theme.toggled();
        self.save_theme(prefs.theme).await;
        prefs
    }

    pub async fn set_theme(&self, theme: Theme) -> Preferences {
        let mut prefs = self.load().await;
        prefs.theme = theme;
        self.save_theme(theme).await;
        prefs
    }

    pub async fn increase_font_size(&self) -> Preferences {
        let mut prefs = self.load().await;
        prefs.font_size = prefs.font_size.increased();
        self.save_font_size(prefs.font_size).await;
        prefs
    }

    pub async fn decrease_font_size(&self) -> Preferences {
        let mut prefs = self.load().await;
        prefs.font_size = prefs.font_size.decreased();
        self.save_font_size(prefs.font_size).await;
        prefs
    }

    async fn save_theme(&self, theme: Theme) {
        if let Err(e) = self.store.set_as(storage_keys::THEME, &theme).await {
            tracing::warn!(error = %e, "Could not save theme preference");
        }
        self.announcer
            .announce(Announcement::polite(format!("{} theme on.", capitalize(theme.as_str()))));
    }

    async fn save_font_size(&self, size: FontSize) {
        if let Err(e) = self.store.set_as(storage_keys::FONT_SIZE, &size).await {
            tracing::warn!(error = %e, "Could not save font size preference");
        }
        self.announcer
            .announce(Announcement::polite(format!("Text size {}.", size.label())));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
