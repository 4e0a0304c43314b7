//! Account module - the locally remembered visitor profile.
//!
//! There is no server-side identity. The profile is a blob kept in the
//! key-value store and must never be treated as proof of identity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::newsletter::EmailAddress;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: EmailAddress,
    #[serde(default)]
    pub is_premium: bool,
}

impl UserProfile {
    pub fn new(
        display_name: impl Into<String>,
        email: &str,
        is_premium: bool,
    ) -> Result<Self, ValidationError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ValidationError::empty_field("display_name"));
        }
        Ok(Self {
            display_name,
            email: EmailAddress::parse(email)?,
            is_premium,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_name_and_email() {
        assert!(UserProfile::new("Ada", "ada@example.com", true).is_ok());
        assert!(UserProfile::new(" ", "ada@example.com", false).is_err());
        assert!(UserProfile::new("Ada", "nope", false).is_err());
    }
}
