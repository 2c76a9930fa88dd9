//! Mock memory store for tests: canned results, recorded calls, no network.

use chat_types::{Chunk, MemoryAck, MemoryStore, MemoryStoreError, SearchResult};
use std::sync::Mutex;

/// Deterministic in-process MemoryStore for tests.
///
/// Serves the configured search results and records every call so tests can
/// assert on queries, written content, and tags.
#[derive(Default)]
pub struct MockMemoryStore {
    results: Mutex<Vec<SearchResult>>,
    searches: Mutex<Vec<(String, Vec<String>)>>,
    writes: Mutex<Vec<(String, Vec<String>)>>,
    fail: Mutex<bool>,
}

impl MockMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that answers every search with the given memory texts, one
    /// single-chunk result each.
    pub fn with_memories(texts: &[&str]) -> Self {
        let store = Self::new();
        store.set_memories(texts);
        store
    }

    pub fn set_memories(&self, texts: &[&str]) {
        let results = texts
            .iter()
            .map(|t| SearchResult {
                chunks: vec![Chunk {
                    content: (*t).to_string(),
                }],
            })
            .collect();
        *self.results.lock().unwrap() = results;
    }

    /// Make every following call fail with a service error.
    pub fn fail_calls(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// Recorded `(query, tags)` pairs, in call order.
    pub fn searches(&self) -> Vec<(String, Vec<String>)> {
        self.searches.lock().unwrap().clone()
    }

    /// Recorded `(content, tags)` pairs, in call order.
    pub fn writes(&self) -> Vec<(String, Vec<String>)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MemoryStore for MockMemoryStore {
    async fn search(
        &self,
        query: &str,
        tags: &[String],
    ) -> Result<Vec<SearchResult>, MemoryStoreError> {
        if *self.fail.lock().unwrap() {
            return Err(MemoryStoreError::Other("mock failure".to_string()));
        }
        self.searches
            .lock()
            .unwrap()
            .push((query.to_string(), tags.to_vec()));
        Ok(self.results.lock().unwrap().clone())
    }

    async fn add(&self, content: &str, tags: &[String]) -> Result<MemoryAck, MemoryStoreError> {
        if *self.fail.lock().unwrap() {
            return Err(MemoryStoreError::Other("mock failure".to_string()));
        }
        let mut writes = self.writes.lock().unwrap();
        writes.push((content.to_string(), tags.to_vec()));
        Ok(MemoryAck {
            id: Some(format!("mem-{}", writes.len())),
            status: Some("queued".to_string()),
        })
    }
}
