//! HTTP client for the hosted memory service API.

use chat_types::{MemoryAck, MemoryStore, MemoryStoreError, SearchResult};
use serde::{Deserialize, Serialize};

/// Connection settings for the hosted memory service.
///
/// The credential is injected from the environment; it is never literal in
/// source.
#[derive(Debug, Clone)]
pub struct MemoryServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl MemoryServiceConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("MEMORY_API_URL")
                .unwrap_or_else(|_| "https://api.supermemory.ai/v3".to_string()),
            api_key: std::env::var("MEMORY_API_KEY").ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    q: &'a str,
    #[serde(rename = "containerTags")]
    container_tags: &'a [String],
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
struct AddBody<'a> {
    content: &'a str,
    #[serde(rename = "containerTags")]
    container_tags: &'a [String],
}

/// MemoryStore backed by the hosted service (e.g. POST /search,
/// POST /memories).
pub struct RemoteMemoryStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteMemoryStore {
    pub fn new(config: MemoryServiceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(MemoryServiceConfig::from_env())
    }

    async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, MemoryStoreError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        let res = req
            .send()
            .await
            .map_err(|e| MemoryStoreError::Other(e.to_string()))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| MemoryStoreError::Other(e.to_string()))?;
        if !status.is_success() {
            return Err(MemoryStoreError::Other(format!(
                "memory API error {}: {}",
                status, text
            )));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl MemoryStore for RemoteMemoryStore {
    async fn search(
        &self,
        query: &str,
        tags: &[String],
    ) -> Result<Vec<SearchResult>, MemoryStoreError> {
        let body = SearchBody {
            q: query,
            container_tags: tags,
        };
        let text = self.post_json("search", &body).await?;
        let parsed: SearchEnvelope =
            serde_json::from_str(&text).map_err(|e| MemoryStoreError::Other(e.to_string()))?;
        Ok(parsed.results)
    }

    async fn add(&self, content: &str, tags: &[String]) -> Result<MemoryAck, MemoryStoreError> {
        let body = AddBody {
            content,
            container_tags: tags,
        };
        let text = self.post_json("memories", &body).await?;
        let ack: MemoryAck =
            serde_json::from_str(&text).map_err(|e| MemoryStoreError::Other(e.to_string()))?;
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_matches_service_contract() {
        let tags = vec!["u1".to_string()];
        let body = SearchBody {
            q: "what do I like",
            container_tags: &tags,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["q"], "what do I like");
        assert_eq!(v["containerTags"][0], "u1");
    }

    #[test]
    fn add_body_matches_service_contract() {
        let tags = vec!["u1".to_string()];
        let body = AddBody {
            content: "remember I like tea",
            container_tags: &tags,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["content"], "remember I like tea");
        assert_eq!(v["containerTags"], serde_json::json!(["u1"]));
    }

    #[test]
    fn search_envelope_tolerates_missing_results() {
        let parsed: SearchEnvelope = serde_json::from_str("{}").unwrap();
        assert!(parsed.results.is_empty());

        let parsed: SearchEnvelope = serde_json::from_str(
            r#"{"results":[{"chunks":[{"content":"I like tea"}]}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].chunks[0].content, "I like tea");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let store = RemoteMemoryStore::new(MemoryServiceConfig {
            base_url: "https://example.test/v3/".to_string(),
            api_key: None,
        });
        assert_eq!(store.base_url, "https://example.test/v3");
    }
}
