//! ValueCategory enum - the fixed set of catalog categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a catalog value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCategory {
    Personal,
    Relationship,
    Professional,
    Lifestyle,
    Societal,
}

impl ValueCategory {
    /// Returns all categories in canonical order.
    pub fn all() -> &'static [ValueCategory] {
        &[
            ValueCategory::Personal,
            ValueCategory::Relationship,
            ValueCategory::Professional,
            ValueCategory::Lifestyle,
            ValueCategory::Societal,
        ]
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueCategory::Personal => "Personal",
            ValueCategory::Relationship => "Relationships",
            ValueCategory::Professional => "Professional",
            ValueCategory::Lifestyle => "Lifestyle",
            ValueCategory::Societal => "Societal",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
