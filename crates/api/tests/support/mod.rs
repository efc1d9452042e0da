//! Shared harness for router tests
//!
//! Builds an `AppContext` whose calendar API and token endpoint both live
//! on a wiremock server, with time pinned by a `FixedClock`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use duedash_core::calendar::CalendarEventSource;
use duedash_core::clock::FixedClock;
use duedash_domain::Config;
use duedash_infra::{GoogleCalendarSource, HttpClient};
use duedash_lib::{router, AppContext};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

pub const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";
pub const TOKEN_PATH: &str = "/token";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

pub struct TestApp {
    pub server: MockServer,
    pub ctx: Arc<AppContext>,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        let mut config = Config::new(
            "client-123",
            "client-secret",
            format!("{}{EVENTS_PATH}", server.uri()),
        );
        config.auth.token_endpoint = format!("{}{TOKEN_PATH}", server.uri());
        config.upstream.timeout_seconds = 2;

        let http = HttpClient::builder().timeout(Duration::from_secs(2)).build().unwrap();
        let source: Arc<dyn CalendarEventSource> =
            Arc::new(GoogleCalendarSource::new(http.clone(), config.upstream_api_base_url.clone()));
        let clock = Arc::new(FixedClock::new(fixed_now()));

        let ctx = AppContext::with_components(config, source, http, clock.clone()).unwrap();

        Self { server, ctx: Arc::new(ctx), clock }
    }

    pub fn router(&self) -> Router {
        router(self.ctx.clone())
    }

    /// Open a session directly and return its `Cookie` header value.
    pub fn sign_in(&self, access_token: &str) -> String {
        let session = self.ctx.sessions.create_session(access_token, None, None, fixed_now());
        format!("duedash_session={}", session.id)
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.router().oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    pub async fn upstream_request_count(&self) -> usize {
        self.server.received_requests().await.map_or(0, |requests| {
            requests.iter().filter(|r| r.url.path() == EVENTS_PATH).count()
        })
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response.headers().get(LOCATION).unwrap().to_str().unwrap()
}

pub fn set_cookie(response: &Response) -> Option<&str> {
    response.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok())
}

pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

/// Upstream listing envelope with `count` timed events due in ten days.
pub fn events_envelope(count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "id": format!("evt-{i}"),
                "summary": format!("Task {i:02}"),
                "description": "Math\nChapter exercises",
                "end": { "dateTime": "2026-10-29T12:00:00Z", "timeZone": "UTC" }
            })
        })
        .collect();
    json!({ "items": items })
}
