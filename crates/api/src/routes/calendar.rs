//! Authenticated calendar proxy endpoint

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use duedash_core::calendar::EventsBody;

use super::finish;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::session::CurrentSession;

const ROUTE: &str = "GET /api/calendar";

/// Upcoming events for the signed-in user, as `{ "events": [...] }`.
///
/// Without a session carrying a bearer token this answers 401 and never
/// contacts the upstream API.
pub async fn upcoming_events(
    State(ctx): State<Arc<AppContext>>,
    current: CurrentSession,
) -> Response {
    let started = Instant::now();

    let result = ctx
        .proxy
        .fetch_upcoming(current.session())
        .await
        .map(|events| Json(EventsBody { events }))
        .map_err(ApiError::from);

    finish(ROUTE, started, result)
}
