//! memchat API server: /api/chat, /chat, /health.

use chat_api::server::{self, AppState};
use chat_engine::ChatEngine;
use chat_memory::RemoteMemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store = Arc::new(RemoteMemoryStore::from_env());
    let engine = ChatEngine::new(store);
    let state = Arc::new(AppState { engine });

    let app = server::router(state);
    let addr: SocketAddr = std::env::var("MEMCHAT_LISTEN")
        .unwrap_or_else(|_| "0.0.0.0:8003".to_string())
        .parse()?;
    tracing::info!("memchat API listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
