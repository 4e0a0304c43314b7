//! DTOs for the newsletter endpoint.
//!
//! The response shape is `{ "success": bool, ... }` in both directions so
//! the static page can handle it without looking at the status code.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeSuccess {
    pub success: bool,
    pub message: String,
}

impl SubscribeSuccess {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeFailure {
    pub success: bool,
    pub error: String,
}

impl SubscribeFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_tolerates_missing_email() {
        let req: SubscribeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
    }

    #[test]
    fn failure_serializes_success_false() {
        let json = serde_json::to_value(SubscribeFailure::new("nope")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "nope");
    }
}
