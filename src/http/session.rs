//! Session cookie middleware.
//!
//! Binds every request to a [`SessionId`]: an existing cookie is parsed
//! and reused, anything else gets a fresh identity and a `Set-Cookie` on
//! the way out. Cookie values are untrusted input; garbage parses to
//! "no session" and silently becomes a new one.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::http::server::AppState;
use crate::session::SessionId;

/// The session identity bound to the current request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentSession(pub SessionId);

/// Middleware attaching a session identity to the request extensions.
pub async fn attach_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let existing = request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|raw| cookie_value(raw, &state.cookie_name))
        .and_then(|value| SessionId::parse(value));

    let (id, fresh) = match existing {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };

    // Touch the session so the idle sweeper sees activity.
    state.pipeline.store().get_or_create(id);
    request.extensions_mut().insert(CurrentSession(id));

    let mut response = next.run(request).await;

    if fresh {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            state.cookie_name, id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn cookie_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
