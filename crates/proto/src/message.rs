use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attachment::AttachmentRef;

/// Unique identifier for a chat session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Creates a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the raw session identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message authored by an end user.
    User,
    /// Message authored by the assistant.
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(crate::error::ProtoError::InvalidRole(other.to_string())),
        }
    }
}

/// One chat turn. Immutable once appended to a session; transcript order is
/// append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Semantic role of this message.
    pub role: Role,
    /// Message content payload, stored verbatim.
    pub content: String,
    /// Descriptors for files attached to this message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
    /// Message creation timestamp in UTC.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message for the given role with no attachments.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            attachments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Creates a user message with no attachments.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a user message carrying attachment descriptors.
    pub fn user_with_attachments(
        content: impl Into<String>,
        attachments: Vec<AttachmentRef>,
    ) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachments,
            created_at: Utc::now(),
        }
    }

    /// Creates an assistant message with no attachments.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::ProtoError;

    #[test]
    fn session_id_new_creates_non_empty_value() {
        let session = SessionId::new();
        assert!(!session.as_str().is_empty());
    }

    #[test]
    fn role_display_and_parse_round_trip() {
        let roles = [Role::User, Role::Assistant];
        for role in roles {
            let rendered = role.to_string();
            let parsed = Role::from_str(&rendered).expect("role should parse");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn role_parse_invalid_value_returns_error() {
        let err = Role::from_str("system").expect_err("invalid role should fail");
        match err {
            ProtoError::InvalidRole(value) => assert_eq!(value, "system"),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn message_user_sets_role_and_content() {
        let msg = Message::user("hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn message_user_with_attachments_keeps_descriptors() {
        let refs = vec![AttachmentRef {
            name: "report.pdf".to_string(),
            size: 2048,
            mime: "application/pdf".to_string(),
        }];
        let msg = Message::user_with_attachments("see attached", refs.clone());
        assert_eq!(msg.content, "see attached");
        assert_eq!(msg.attachments, refs);
    }

    #[test]
    fn message_serializes_roles_lowercase_and_skips_empty_attachments() {
        let json = serde_json::to_value(Message::assistant("hi")).expect("serialize");
        assert_eq!(json["role"], "assistant");
        assert!(json.get("attachments").is_none());
    }
}
