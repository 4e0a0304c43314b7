//! Font size preference, stepped through a fixed scale.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    const SCALE: [FontSize; 4] = [
        FontSize::Small,
        FontSize::Medium,
        FontSize::Large,
        FontSize::ExtraLarge,
    ];

    fn index(&self) -> usize {
        match self {
            FontSize::Small => 0,
            FontSize::Medium => 1,
            FontSize::Large => 2,
            FontSize::ExtraLarge => 3,
        }
    }

    /// Next size up; stays at the largest.
    pub fn increased(&self) -> FontSize {
        Self::SCALE[(self.index() + 1).min(Self::SCALE.len() - 1)]
    }

    /// Next size down; stays at the smallest.
    pub fn decreased(&self) -> FontSize {
        Self::SCALE[self.index().saturating_sub(1)]
    }

    /// Human-readable name for announcements.
    pub fn label(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
            FontSize::ExtraLarge => "extra large",
        }
    }

    /// Root font size in pixels.
    pub fn pixels(&self) -> u8 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
            FontSize::ExtraLarge => 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_clamp_at_both_ends() {
        assert_eq!(FontSize::ExtraLarge.increased(), FontSize::ExtraLarge);
        assert_eq!(FontSize::Small.decreased(), FontSize::Small);
        assert_eq!(FontSize::Medium.increased(), FontSize::Large);
        assert_eq!(FontSize::Medium.decreased(), FontSize::Small);
    }

    #[test]
    fn pixels_grow_with_size() {
        assert!(FontSize::Small.pixels() < FontSize::ExtraLarge.pixels());
    }
}
