//! Chat transcript: append-only messages with explicit turn phases.
//!
//! A turn moves through two phases: the user message is appended
//! optimistically when the turn begins, and the assistant side lands when
//! the turn resolves, either as the confirmed server reply or as a locally
//! synthesized error message. The transcript lives only as long as the view.

use chat_types::{ChatMessage, Role};
use chrono::Utc;
use uuid::Uuid;

const WELCOME: &str = "👋 Welcome! I can remember our conversations. Try saying:\n\n• \"Remember that I love Rust\"\n• \"What do you know about me?\"\n• \"Test memory storage\"";

/// Outcome of an in-flight turn.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Assistant reply confirmed by the server.
    Reply(ChatMessage),
    /// Transport or handler failure, shown as a synthesized assistant
    /// message.
    Failed(String),
}

/// Append-only chat transcript with at most one outstanding turn.
pub struct Transcript {
    messages: Vec<ChatMessage>,
    busy: bool,
}

impl Transcript {
    /// New transcript seeded with the welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![local_assistant(WELCOME)],
            busy: false,
        }
    }

    /// Try to start a turn. Appends the user message optimistically and
    /// returns it; returns `None` while a turn is outstanding or the input
    /// is blank.
    pub fn begin_turn(&mut self, input: &str) -> Option<ChatMessage> {
        let trimmed = input.trim();
        if trimmed.is_empty() || self.busy {
            return None;
        }
        let user = ChatMessage::user(trimmed);
        self.messages.push(user.clone());
        self.busy = true;
        Some(user)
    }

    /// Resolve the outstanding turn. Always clears the busy flag.
    pub fn resolve_turn(&mut self, outcome: TurnOutcome) {
        match outcome {
            TurnOutcome::Reply(msg) => self.messages.push(msg),
            TurnOutcome::Failed(text) => self.messages.push(local_assistant(&text)),
        }
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Assistant message created on this side of the wire; carries no memory
/// flag, unlike server replies.
fn local_assistant(content: &str) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        role: Role::Assistant,
        content: content.to_string(),
        timestamp: Utc::now(),
        memory_created: None,
    }
}
