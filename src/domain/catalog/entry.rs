//! ValueEntry - one immutable catalog record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ValidationError, ValueId};

use super::ValueCategory;

/// A value the user can choose during the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueEntry {
    id: ValueId,
    name: String,
    description: String,
    category: ValueCategory,
}

impl ValueEntry {
    /// Creates an entry, rejecting a blank name.
    pub fn new(
        id: ValueId,
        name: impl Into<String>,
        description: impl Into<String>,
        category: ValueCategory,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name: name.trim().to_string(),
            description: description.into().trim().to_string(),
            category,
        })
    }

    pub fn id(&self) -> &ValueId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> ValueCategory {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_text_fields() {
        let entry = ValueEntry::new(
            ValueId::new("honesty").unwrap(),
            "  Honesty ",
            " Being truthful. ",
            ValueCategory::Personal,
        )
        .unwrap();

        assert_eq!(entry.name(), "Honesty");
        assert_eq!(entry.description(), "Being truthful.");
    }

    #[test]
    fn new_rejects_blank_name() {
        let result = ValueEntry::new(
            ValueId::new("honesty").unwrap(),
            "   ",
            "",
            ValueCategory::Personal,
        );
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }
}
