//! UserIntent - everything a user can ask the wizard to do.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValueId;

use super::WizardStep;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserIntent {
    Next,
    Previous,
    Restart,
    JumpTo { step: WizardStep },
    ToggleValue { value_id: ValueId },
    SelectValue { value_id: ValueId },
    DeselectValue { value_id: ValueId },
    MoveUp { value_id: ValueId },
    MoveDown { value_id: ValueId },
    /// Places a value at a 1-based rank.
    MoveTo { value_id: ValueId, rank: usize },
    SaveReflection { value_id: ValueId, text: String },
}

impl UserIntent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            UserIntent::Next => "next",
            UserIntent::Previous => "previous",
            UserIntent::Restart => "restart",
            UserIntent::JumpTo { .. } => "jump_to",
            UserIntent::ToggleValue { .. } => "toggle_value",
            UserIntent::SelectValue { .. } => "select_value",
            UserIntent::DeselectValue { .. } => "deselect_value",
            UserIntent::MoveUp { .. } => "move_up",
            UserIntent::MoveDown { .. } => "move_down",
            UserIntent::MoveTo { .. } => "move_to",
            UserIntent::SaveReflection { .. } => "save_reflection",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tagged_json() {
        let intent: UserIntent =
            serde_json::from_str(r#"{"type":"move_up","value_id":"compassion"}"#).unwrap();
        assert_eq!(
            intent,
            UserIntent::MoveUp {
                value_id: ValueId::new("compassion").unwrap()
            }
        );

        let intent: UserIntent =
            serde_json::from_str(r#"{"type":"jump_to","step":"selection"}"#).unwrap();
        assert_eq!(intent.name(), "jump_to");
    }

    #[test]
    fn rejects_invalid_value_id() {
        let result: Result<UserIntent, _> =
            serde_json::from_str(r#"{"type":"toggle_value","value_id":"Not Valid"}"#);
        assert!(result.is_err());
    }
}
