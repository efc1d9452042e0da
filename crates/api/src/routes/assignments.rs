use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::dashboard::ensure_table;
use super::finish;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::session::CurrentSession;

const ROUTE: &str = "GET /api/assignments";

/// Current table page and pagination metadata as JSON.
pub async fn current_page(
    State(ctx): State<Arc<AppContext>>,
    current: CurrentSession,
) -> Response {
    let started = Instant::now();

    let Some(session) = current.session().filter(|s| s.bearer_token().is_some()) else {
        return finish(ROUTE, started, ApiError::unauthorized());
    };

    let table = ensure_table(&ctx, session).await;
    let response = Json(table.page()).into_response();
    finish(ROUTE, started, response)
}
