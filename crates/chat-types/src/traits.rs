//! Trait for the hosted memory service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One ranked search result from the memory service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

/// A chunk of stored memory text within a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
}

/// Acknowledgement returned by the memory service for a write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryAck {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Memory service abstraction: semantic search and write, both scoped by
/// container tags. Every call from this repository uses exactly one tag,
/// the requesting user's id.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Search stored memories for `query`, scoped to `tags`. Results come
    /// back in the service's ranking order.
    async fn search(
        &self,
        query: &str,
        tags: &[String],
    ) -> Result<Vec<SearchResult>, MemoryStoreError>;

    /// Store `content` as a new memory tagged with `tags`.
    async fn add(&self, content: &str, tags: &[String]) -> Result<MemoryAck, MemoryStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("memory service error: {0}")]
    Other(String),
}

/// Failures of one chat turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("missing required fields")]
    InvalidInput,
    #[error("upstream failure: {0}")]
    Upstream(#[from] MemoryStoreError),
}
