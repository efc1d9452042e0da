//! HTTP routes

pub mod assignments;
pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod health;

use std::sync::Arc;
use std::time::Instant;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::context::AppContext;
use crate::utils::logging::log_request_outcome;

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/calendar", get(calendar::upcoming_events))
        .route("/api/assignments", get(assignments::current_page))
        .route("/api/auth/signin", get(auth::signin))
        .route("/api/auth/callback", get(auth::callback))
        .route("/api/auth/signout", get(auth::signout))
        .route("/login", get(auth::login_page))
        .route("/", get(dashboard::index))
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/sort/{key}", get(dashboard::sort))
        .route("/dashboard/search", get(dashboard::search))
        .route("/dashboard/page/{direction}", get(dashboard::paginate))
        .route("/dashboard/refresh", get(dashboard::refresh))
        .with_state(ctx)
}

/// Convert to a response and log the outcome against `route`.
pub(crate) fn finish(route: &str, started: Instant, response: impl IntoResponse) -> Response {
    let response = response.into_response();
    log_request_outcome(route, started.elapsed(), response.status());
    response
}
