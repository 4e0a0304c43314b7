//! EmailAddress value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_EMAIL_LEN: usize = 254;

/// A syntactically plausible email address, trimmed and lowercased.
///
/// Only shape is checked (one `@`, non-empty local part, dotted domain);
/// deliverability is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::invalid_format("email", "address is too long"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "address contains whitespace"));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing '@'"))?;
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "malformed address"));
        }
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
            return Err(ValidationError::invalid_format("email", "malformed domain"));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}
