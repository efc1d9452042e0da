//! Dashboard page and its table controls
//!
//! Every control is a plain link that mutates the session's table and
//! redirects back to `/dashboard`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect, Response};
use duedash_core::assignments::AssignmentTable;
use duedash_domain::{SortKey, UserSession};
use serde::Deserialize;
use tracing::debug;

use super::finish;
use crate::context::AppContext;
use crate::render::render_dashboard;
use crate::session::CurrentSession;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// The session's table, running the first fetch cycle if none exists yet.
pub(crate) async fn ensure_table(ctx: &AppContext, session: &UserSession) -> AssignmentTable {
    if let Some(table) = ctx.sessions.table(&session.id) {
        return table;
    }

    let table = ctx.dashboard.open_table(Some(session)).await;
    ctx.sessions.store_table(&session.id, table.clone());
    table
}

fn back_to_dashboard() -> Redirect {
    Redirect::to("/dashboard")
}

fn to_login() -> Redirect {
    Redirect::to("/login")
}

pub async fn index() -> Redirect {
    back_to_dashboard()
}

pub async fn show(State(ctx): State<Arc<AppContext>>, current: CurrentSession) -> Response {
    const ROUTE: &str = "GET /dashboard";
    let started = Instant::now();

    let Some(session) = current.session() else {
        return finish(ROUTE, started, to_login());
    };

    let table = ensure_table(&ctx, session).await;
    let html = render_dashboard(&table.page(), session.email.as_deref());
    finish(ROUTE, started, Html(html))
}

pub async fn sort(
    State(ctx): State<Arc<AppContext>>,
    current: CurrentSession,
    Path(key): Path<String>,
) -> Response {
    const ROUTE: &str = "GET /dashboard/sort/{key}";
    let started = Instant::now();

    let Some(session) = current.session() else {
        return finish(ROUTE, started, to_login());
    };

    match key.parse::<SortKey>() {
        Ok(key) => {
            ensure_table(&ctx, session).await;
            ctx.sessions.update_table(&session.id, |table| table.toggle_sort(key));
        }
        Err(err) => debug!(error = %err, "ignoring unknown sort key"),
    }

    finish(ROUTE, started, back_to_dashboard())
}

pub async fn search(
    State(ctx): State<Arc<AppContext>>,
    current: CurrentSession,
    Query(params): Query<SearchParams>,
) -> Response {
    const ROUTE: &str = "GET /dashboard/search";
    let started = Instant::now();

    let Some(session) = current.session() else {
        return finish(ROUTE, started, to_login());
    };

    ensure_table(&ctx, session).await;
    ctx.sessions.update_table(&session.id, |table| table.set_search_term(params.q));

    finish(ROUTE, started, back_to_dashboard())
}

pub async fn paginate(
    State(ctx): State<Arc<AppContext>>,
    current: CurrentSession,
    Path(direction): Path<String>,
) -> Response {
    const ROUTE: &str = "GET /dashboard/page/{direction}";
    let started = Instant::now();

    let Some(session) = current.session() else {
        return finish(ROUTE, started, to_login());
    };

    ensure_table(&ctx, session).await;
    let moved = match direction.as_str() {
        "next" => ctx.sessions.update_table(&session.id, AssignmentTable::next_page),
        "prev" | "previous" => ctx.sessions.update_table(&session.id, AssignmentTable::previous_page),
        _ => None,
    };
    if moved != Some(true) {
        debug!(direction = %direction, "page change ignored");
    }

    finish(ROUTE, started, back_to_dashboard())
}

/// New fetch cycle; view state survives, records are replaced.
pub async fn refresh(State(ctx): State<Arc<AppContext>>, current: CurrentSession) -> Response {
    const ROUTE: &str = "GET /dashboard/refresh";
    let started = Instant::now();

    let Some(session) = current.session() else {
        return finish(ROUTE, started, to_login());
    };

    let records = ctx.dashboard.load_records(Some(session)).await;
    if !ctx.sessions.refresh_table(&session.id, records) {
        debug!("session ended during refresh");
    }

    finish(ROUTE, started, back_to_dashboard())
}
