//! Request and response DTOs for the chat transports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Single chat message. Immutable once created; timestamps are RFC 3339 on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Present on assistant messages; user messages never carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_created: Option<bool>,
}

impl ChatMessage {
    /// New user message with a fresh id and the current timestamp.
    pub fn user(content: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            memory_created: None,
        }
    }

    /// New assistant message; always carries the memory flag.
    pub fn assistant(content: &str, memory_created: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.to_string(),
            timestamp: Utc::now(),
            memory_created: Some(memory_created),
        }
    }
}

/// Incoming chat request, accepted as JSON or form fields.
///
/// Fields default to empty so that absent and empty values take the same
/// validation path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub message: String,
}

/// Result of one chat turn: the echoed user message, the assistant reply,
/// and how many memories the search surfaced (capped upstream).
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
    pub memories_found: usize,
}

/// Successful chat response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnResponse {
    pub success: bool,
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
    pub memories_found: usize,
}

impl From<ChatTurn> for ChatTurnResponse {
    fn from(turn: ChatTurn) -> Self {
        Self {
            success: true,
            user_message: turn.user_message,
            assistant_message: turn.assistant_message,
            memories_found: turn.memories_found,
        }
    }
}

/// Error body returned by both transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Loader payload for the chat route: the session user id and the (always
/// empty) server-side message seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBootstrap {
    pub user_id: String,
    pub messages: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_omits_memory_flag() {
        let msg = ChatMessage::user("hi there");
        let v = serde_json::to_value(&msg).unwrap();
        assert_eq!(v["role"], "user");
        assert_eq!(v["content"], "hi there");
        assert!(v.get("memoryCreated").is_none());
    }

    #[test]
    fn assistant_message_always_carries_memory_flag() {
        let v = serde_json::to_value(ChatMessage::assistant("ok", false)).unwrap();
        assert_eq!(v["memoryCreated"], false);
        let v = serde_json::to_value(ChatMessage::assistant("ok", true)).unwrap();
        assert_eq!(v["memoryCreated"], true);
    }

    #[test]
    fn timestamp_round_trips_through_wire_format() {
        let msg = ChatMessage::assistant("ok", false);
        let wire = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&wire).unwrap();
        assert_eq!(back.timestamp, msg.timestamp);
    }

    #[test]
    fn chat_request_defaults_missing_fields_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"userId":"u1"}"#).unwrap();
        assert_eq!(req.user_id, "u1");
        assert!(req.message.is_empty());
    }

    #[test]
    fn response_uses_camel_case_keys() {
        let turn = ChatTurn {
            user_message: ChatMessage::user("q"),
            assistant_message: ChatMessage::assistant("a", true),
            memories_found: 2,
        };
        let v = serde_json::to_value(ChatTurnResponse::from(turn)).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["memoriesFound"], 2);
        assert!(v.get("userMessage").is_some());
        assert!(v.get("assistantMessage").is_some());
    }
}
