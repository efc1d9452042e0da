//! Session cookie handling
//!
//! The browser only holds an opaque session id in `duedash_session`; the
//! bearer token never leaves the server.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use duedash_domain::constants::SESSION_COOKIE_NAME;
use duedash_domain::UserSession;

use crate::context::AppContext;

/// Session resolved from the request cookie, if any
///
/// Never rejects: handlers decide what a missing session means.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<UserSession>);

impl CurrentSession {
    pub fn session(&self) -> Option<&UserSession> {
        self.0.as_ref()
    }
}

impl FromRequestParts<Arc<AppContext>> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let now = ctx.clock.now();
        let session =
            session_id_from_headers(&parts.headers).and_then(|id| ctx.sessions.get(&id, now));
        Ok(Self(session))
    }
}

/// Find the session id in any `Cookie` header.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value establishing the session.
pub fn session_cookie(session_id: &str, secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE_NAME}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
