//! Per-turn orchestration: search, decide, optional write, assemble.

use crate::decide::decide_reply;
use chat_types::{ChatError, ChatMessage, ChatTurn, MemoryStore, SearchResult};
use std::sync::Arc;

/// How many recalled memories feed the reply decision.
const TOP_MEMORIES: usize = 3;

/// Coordinates one chat turn against the hosted memory service.
///
/// Each turn performs at most two sequential upstream calls: the search, and
/// one optional write.
pub struct ChatEngine {
    store: Arc<dyn MemoryStore + Send + Sync>,
}

impl ChatEngine {
    pub fn new(store: Arc<dyn MemoryStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Join each result's chunk contents into one memory text; keep at most
    /// the top three.
    fn relevant_memories(results: &[SearchResult]) -> Vec<String> {
        results
            .iter()
            .take(TOP_MEMORIES)
            .map(|r| {
                r.chunks
                    .iter()
                    .map(|c| c.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect()
    }

    /// Run one turn for `user_id`: search scoped to the user's tag, decide
    /// the reply, persist at most one memory, and return the message pair.
    ///
    /// Rejects blank input before any upstream call.
    pub async fn handle_turn(&self, user_id: &str, message: &str) -> Result<ChatTurn, ChatError> {
        if user_id.is_empty() || message.is_empty() {
            return Err(ChatError::InvalidInput);
        }

        let tags = vec![user_id.to_string()];
        let results = self.store.search(message, &tags).await?;
        let relevant = Self::relevant_memories(&results);
        tracing::debug!(user_id, found = relevant.len(), "memory search complete");

        let user_message = ChatMessage::user(message);

        let decision = decide_reply(message, &relevant);
        let mut memory_created = false;
        if let Some(ref content) = decision.memory_write {
            self.store.add(content, &tags).await?;
            memory_created = true;
            tracing::debug!(user_id, "memory stored");
        }

        let assistant_message = ChatMessage::assistant(&decision.reply, memory_created);

        Ok(ChatTurn {
            user_message,
            assistant_message,
            memories_found: relevant.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_memory::MockMemoryStore;
    use chat_types::Chunk;

    fn engine_with(store: Arc<MockMemoryStore>) -> ChatEngine {
        ChatEngine::new(store)
    }

    #[tokio::test]
    async fn blank_input_makes_no_upstream_call() {
        let store = Arc::new(MockMemoryStore::new());
        let engine = engine_with(Arc::clone(&store));

        assert!(matches!(
            engine.handle_turn("", "hello").await,
            Err(ChatError::InvalidInput)
        ));
        assert!(matches!(
            engine.handle_turn("u1", "").await,
            Err(ChatError::InvalidInput)
        ));
        assert!(store.searches().is_empty());
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn remember_writes_exactly_one_memory_with_user_tag() {
        let store = Arc::new(MockMemoryStore::new());
        let engine = engine_with(Arc::clone(&store));

        let turn = engine.handle_turn("u1", "remember I like tea").await.unwrap();
        assert_eq!(
            store.writes(),
            vec![("remember I like tea".to_string(), vec!["u1".to_string()])]
        );
        assert_eq!(turn.assistant_message.memory_created, Some(true));
        assert_eq!(turn.memories_found, 0);
    }

    #[tokio::test]
    async fn search_is_scoped_to_the_user_tag() {
        let store = Arc::new(MockMemoryStore::new());
        let engine = engine_with(Arc::clone(&store));

        engine.handle_turn("u7", "hello").await.unwrap();
        assert_eq!(
            store.searches(),
            vec![("hello".to_string(), vec!["u7".to_string()])]
        );
    }

    #[tokio::test]
    async fn recall_never_writes() {
        let store = Arc::new(MockMemoryStore::with_memories(&["I like tea"]));
        let engine = engine_with(Arc::clone(&store));

        let turn = engine
            .handle_turn("u1", "recall what I told you")
            .await
            .unwrap();
        assert!(store.writes().is_empty());
        assert_eq!(turn.assistant_message.memory_created, Some(false));
        assert!(turn.assistant_message.content.contains("1. I like tea"));
    }

    #[tokio::test]
    async fn memories_found_is_capped_at_three() {
        let store = Arc::new(MockMemoryStore::with_memories(&[
            "one", "two", "three", "four", "five",
        ]));
        let engine = engine_with(store);

        let turn = engine.handle_turn("u1", "anything at all").await.unwrap();
        assert_eq!(turn.memories_found, 3);
    }

    #[test]
    fn result_chunks_are_joined_per_memory() {
        let results = vec![SearchResult {
            chunks: vec![
                Chunk {
                    content: "line one".to_string(),
                },
                Chunk {
                    content: "line two".to_string(),
                },
            ],
        }];
        let joined = ChatEngine::relevant_memories(&results);
        assert_eq!(joined, vec!["line one\nline two".to_string()]);
    }

    #[tokio::test]
    async fn auto_save_prefixes_the_content() {
        let store = Arc::new(MockMemoryStore::new());
        let engine = engine_with(Arc::clone(&store));

        engine
            .handle_turn("u1", "I went to the store today and bought bread")
            .await
            .unwrap();
        assert_eq!(
            store.writes(),
            vec![(
                "User mentioned: I went to the store today and bought bread".to_string(),
                vec!["u1".to_string()]
            )]
        );
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_chat_error() {
        let store = Arc::new(MockMemoryStore::new());
        store.fail_calls();
        let engine = engine_with(store);

        assert!(matches!(
            engine.handle_turn("u1", "hello").await,
            Err(ChatError::Upstream(_))
        ));
    }
}
