//! HTTP client for the memchat API.

use anyhow::{bail, Context, Result};
use chat_types::{ChatBootstrap, ChatMessage, ChatRequest, ChatTurnResponse, ErrorBody};

/// Failure of one send, split the way the view reports it: errors the
/// handler returned versus the transport falling over.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("{0}")]
    Handler(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Client for the chat API; keeps the session cookie across calls.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Load the chat route once to obtain (and pin) the session user id.
    pub async fn bootstrap(&self) -> Result<String> {
        let res = self
            .http
            .get(format!("{}/chat", self.base_url))
            .send()
            .await
            .context("requesting session bootstrap")?;
        if !res.status().is_success() {
            bail!("bootstrap failed: HTTP {}", res.status());
        }
        let boot: ChatBootstrap = res.json().await.context("decoding bootstrap")?;
        Ok(boot.user_id)
    }

    /// Send one message and return the confirmed assistant reply.
    pub async fn send(&self, user_id: &str, message: &str) -> Result<ChatMessage, SendError> {
        let req = ChatRequest {
            user_id: user_id.to_string(),
            message: message.to_string(),
        };
        let res = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&req)
            .send()
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let status = res.status();
        if status.is_success() {
            let parsed: ChatTurnResponse = res
                .json()
                .await
                .map_err(|e| SendError::Transport(e.to_string()))?;
            log::debug!(
                "turn ok (memories_found={}, memory_created={:?})",
                parsed.memories_found,
                parsed.assistant_message.memory_created
            );
            Ok(parsed.assistant_message)
        } else {
            let error = match res.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP {}", status),
            };
            Err(SendError::Handler(error))
        }
    }
}
