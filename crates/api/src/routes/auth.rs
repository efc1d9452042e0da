//! Sign-in, callback and sign-out
//!
//! The provider's authorization-code flow with PKCE. Pending logins are
//! keyed by their CSRF state and consumed exactly once.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use duedash_infra::integrations::calendar::extract_email_from_id_token;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::finish;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::render::render_login;
use crate::session::{clear_session_cookie, session_cookie, CurrentSession};

/// Query string the provider sends back to the callback
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declines consent.
    pub error: Option<String>,
}

pub async fn login_page() -> Html<String> {
    Html(render_login())
}

/// Start a login and send the browser to the provider.
pub async fn signin(State(ctx): State<Arc<AppContext>>) -> Response {
    let started = Instant::now();

    let challenge = ctx.oauth.begin_login();
    ctx.sessions.begin_login(challenge.state, challenge.code_verifier, ctx.clock.now());
    debug!(pending = ctx.sessions.pending_login_count(), "login started");

    finish("GET /api/auth/signin", started, Redirect::to(&challenge.authorization_url))
}

/// Complete a login: verify state, exchange the code, open a session.
pub async fn callback(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let started = Instant::now();
    let result = complete_login(&ctx, params).await;
    finish("GET /api/auth/callback", started, result)
}

async fn complete_login(ctx: &AppContext, params: CallbackParams) -> Result<Response, ApiError> {
    if let Some(error) = params.error {
        warn!(provider_error = %error, "provider declined the login");
        return Err(ApiError::unauthorized());
    }

    let (Some(code), Some(state)) = (params.code, params.state) else {
        warn!("callback without code or state");
        return Err(ApiError::unauthorized());
    };

    let Some(code_verifier) = ctx.sessions.complete_login(&state, ctx.clock.now()) else {
        warn!("callback state does not match a pending login");
        return Err(ApiError::unauthorized());
    };

    let token = ctx.oauth.exchange_code(&code, &code_verifier).await?;

    let email = token.id_token.as_deref().and_then(|id_token| {
        extract_email_from_id_token(id_token)
            .map_err(|err| debug!(error = %err, "id token carried no usable email"))
            .ok()
    });

    let session = ctx.sessions.create_session(
        token.access_token,
        email,
        token.expires_in,
        ctx.clock.now(),
    );
    info!(sessions = ctx.sessions.session_count(), "user signed in");

    let secure = ctx.config.server.base_url.starts_with("https://");
    let cookie = session_cookie(&session.id, secure);

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/dashboard")).into_response())
}

/// Drop the session and clear the cookie.
pub async fn signout(State(ctx): State<Arc<AppContext>>, current: CurrentSession) -> Response {
    let started = Instant::now();

    if let Some(session) = current.session() {
        ctx.sessions.remove(&session.id);
        info!("user signed out");
    }

    finish(
        "GET /api/auth/signout",
        started,
        (AppendHeaders([(SET_COOKIE, clear_session_cookie())]), Redirect::to("/login")),
    )
}
