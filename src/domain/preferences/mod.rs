//! Preferences module - display settings remembered across visits.

mod font_size;
mod theme;

pub use font_size::FontSize;
pub use theme::Theme;

use serde::{Deserialize, Serialize};

/// Display preferences. Rendering is a projection of these fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: FontSize,
}
