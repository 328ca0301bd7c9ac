//! Conversation turns.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The person chatting. Content is the prompt exactly as it was sent.
    User,
    /// The remote model.
    Model,
}

/// One message exchanged with the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: TurnRole,
    content: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates a model turn.
    pub fn model(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Model, content)
    }

    fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role() {
        assert_eq!(Turn::user("hi").role(), TurnRole::User);
        assert_eq!(Turn::model("hello").role(), TurnRole::Model);
        assert_eq!(Turn::user("hi").content(), "hi");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::Model).unwrap(), "\"model\"");
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
    }
}
