//! Session cookie: one opaque user id per browser, minted on first visit.

use axum::http::{header, HeaderMap};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "memchat_session";

/// The cookie never expires in practice; the id is assigned once and echoed
/// back on every load.
const FAR_FUTURE: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

/// Extract the session user id from the Cookie header, if present.
pub fn user_id_from_cookies(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

/// Existing session id, or a freshly minted one.
pub fn resolve_user_id(headers: &HeaderMap) -> String {
    user_id_from_cookies(headers).unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Set-Cookie value committing `user_id` with a far-future expiry.
pub fn set_cookie(user_id: &str) -> String {
    format!(
        "{}={}; Path=/; Expires={}; SameSite=Lax",
        SESSION_COOKIE, user_id, FAR_FUTURE
    )
}
