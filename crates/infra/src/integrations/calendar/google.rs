//! Google Calendar event source

use async_trait::async_trait;
use duedash_core::calendar::{CalendarEventSource, UpcomingEventsQuery};
use duedash_domain::{Result, UpstreamEventList};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::http::HttpClient;

/// Lists upcoming events from the configured events endpoint
///
/// `events_url` is the full listing URL, e.g.
/// `https://www.googleapis.com/calendar/v3/calendars/primary/events`.
pub struct GoogleCalendarSource {
    http: HttpClient,
    events_url: String,
}

impl GoogleCalendarSource {
    pub fn new(http: HttpClient, events_url: impl Into<String>) -> Self {
        Self { http, events_url: events_url.into() }
    }

    pub fn events_url(&self) -> &str {
        &self.events_url
    }
}

#[async_trait]
impl CalendarEventSource for GoogleCalendarSource {
    async fn list_upcoming(
        &self,
        access_token: &str,
        query: &UpcomingEventsQuery,
    ) -> Result<Vec<Value>> {
        let request = self
            .http
            .request(Method::GET, self.events_url.as_str())
            .bearer_auth(access_token)
            .query(&query.to_query_pairs());

        let listing: UpstreamEventList = self.http.send_json(request).await?;
        debug!(count = listing.items.len(), "google calendar listing decoded");

        Ok(listing.items)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use duedash_domain::DueDashError;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";

    fn source(server: &MockServer) -> GoogleCalendarSource {
        let http = HttpClient::builder().timeout(Duration::from_secs(2)).build().unwrap();
        GoogleCalendarSource::new(http, format!("{}{}", server.uri(), EVENTS_PATH))
    }

    fn query() -> UpcomingEventsQuery {
        UpcomingEventsQuery::starting_at(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn sends_bearer_token_and_fixed_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(header("authorization", "Bearer ya29.secret"))
            .and(query_param("timeMin", "2026-10-19T08:00:00.000Z"))
            .and(query_param("maxResults", "50"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .and(query_param(
                "fields",
                "items(id,summary,description,start,end,status,organizer,location)",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "id": "evt1",
                        "summary": "Essay draft",
                        "description": "English 201\nThree pages",
                        "end": {"dateTime": "2026-10-20T17:00:00-04:00", "timeZone": "America/New_York"},
                        "status": "confirmed"
                    },
                    {"id": "evt2", "end": {"date": "2026-10-25"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let events = source(&server).list_upcoming("ya29.secret", &query()).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["id"], "evt1");
        assert_eq!(events[0]["summary"], "Essay draft");
        assert_eq!(events[0]["end"]["timeZone"], "America/New_York");
        assert!(events[1].get("summary").is_none());
        assert_eq!(events[1]["end"]["date"], "2026-10-25");
    }

    #[tokio::test]
    async fn malformed_item_does_not_fail_the_listing() {
        let server = MockServer::start().await;
        let items = json!([
            {"id": "ok", "summary": "Essay", "end": {"dateTime": "2026-10-20T12:00:00Z"}},
            {"summary": "No id", "end": {"date": "2026-10-21"}},
            {"id": 17, "summary": null, "end": "tomorrow"}
        ]);
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
            .mount(&server)
            .await;

        let events = source(&server).list_upcoming("tok", &query()).await.unwrap();

        assert_eq!(Value::Array(events), items);
    }

    #[tokio::test]
    async fn missing_items_is_an_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let events = source(&server).list_upcoming("tok", &query()).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn rejected_token_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"code": 401, "message": "Invalid Credentials"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = source(&server).list_upcoming("expired", &query()).await.unwrap_err();
        assert!(matches!(err, DueDashError::Auth(msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn malformed_body_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source(&server).list_upcoming("tok", &query()).await.unwrap_err();
        assert!(err.is_upstream_failure(), "got {err:?}");
    }
}
