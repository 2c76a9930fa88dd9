//! Axum server and routes.
//!
//! Two transports expose the same turn algorithm: the standalone handler at
//! `/api/chat` and the session-cookie route at `/chat`. Both go through
//! [`run_turn`]; divergence between them is a defect.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use chat_engine::ChatEngine;
use chat_types::{ChatBootstrap, ChatError, ChatRequest, ChatTurnResponse, ErrorBody};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::session;

pub struct AppState {
    pub engine: ChatEngine,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", any(handle_api_chat))
        .route("/chat", any(handle_chat_route))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Standalone chat handler: OPTIONS preflight, POST turn, 405 otherwise.
async fn handle_api_chat(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match method {
        Method::OPTIONS => preflight(),
        Method::POST => run_turn(&state, &headers, &body).await,
        _ => json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

/// Chat route: GET serves the session loader, POST runs the same turn
/// algorithm as the standalone handler.
async fn handle_chat_route(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match method {
        Method::GET => chat_loader(&headers),
        Method::POST => run_turn(&state, &headers, &body).await,
        Method::OPTIONS => preflight(),
        _ => json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
    }
}

/// Loader: resolve or mint the session user id and always re-commit the
/// cookie with a far-future expiry.
fn chat_loader(headers: &HeaderMap) -> Response {
    let user_id = session::resolve_user_id(headers);
    let bootstrap = ChatBootstrap {
        user_id: user_id.clone(),
        messages: Vec::new(),
    };
    (
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, session::set_cookie(&user_id))]),
        Json(bootstrap),
    )
        .into_response()
}

/// Parse the request body as JSON or form fields, then run one turn.
async fn run_turn(state: &AppState, headers: &HeaderMap, body: &Bytes) -> Response {
    let Some(req) = parse_chat_request(headers, body) else {
        return json_error(StatusCode::BAD_REQUEST, "Missing required fields");
    };
    match state.engine.handle_turn(&req.user_id, &req.message).await {
        Ok(turn) => json_ok(ChatTurnResponse::from(turn)),
        Err(ChatError::InvalidInput) => {
            json_error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        Err(ChatError::Upstream(e)) => {
            tracing::error!(error = %e, "chat turn failed");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to process message")
        }
    }
}

fn parse_chat_request(headers: &HeaderMap, body: &Bytes) -> Option<ChatRequest> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.starts_with("application/x-www-form-urlencoded") {
        serde_urlencoded::from_bytes(body).ok()
    } else {
        serde_json::from_slice(body).ok()
    }
}

fn preflight() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

async fn handle_health() -> &'static str {
    "ok"
}
