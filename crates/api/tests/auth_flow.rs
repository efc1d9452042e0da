//! Sign-in, callback and sign-out through the router

mod support;

use axum::http::StatusCode;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;
use support::{
    assert_redirect, body_json, body_text, events_envelope, location, set_cookie, TestApp,
    EVENTS_PATH, TOKEN_PATH,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn query_value<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

fn id_token_for(email: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(json!({ "email": email }).to_string());
    format!("{header}.{payload}.sig")
}

#[tokio::test]
async fn signin_redirects_to_provider_with_pkce() {
    let app = TestApp::start().await;

    let response = app.get("/api/auth/signin", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("https://accounts.google.com/"));
    assert_eq!(query_value(target, "response_type"), Some("code"));
    assert_eq!(query_value(target, "client_id"), Some("client-123"));
    assert_eq!(query_value(target, "prompt"), Some("consent"));
    assert_eq!(query_value(target, "access_type"), Some("offline"));
    assert_eq!(query_value(target, "code_challenge_method"), Some("S256"));
    assert!(query_value(target, "scope").unwrap().contains("calendar.readonly"));
    assert!(query_value(target, "state").is_some());
    assert_eq!(app.ctx.sessions.pending_login_count(), 1);
}

#[tokio::test]
async fn callback_with_unknown_state_is_unauthorized() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let response = app.get("/api/auth/callback?code=abc&state=forged", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({"error": "Unauthorized"}));
    assert_eq!(app.ctx.sessions.session_count(), 0);
}

#[tokio::test]
async fn callback_with_provider_error_is_unauthorized() {
    let app = TestApp::start().await;

    let response = app.get("/api/auth/callback?error=access_denied", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rejected_code_is_unauthorized() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .mount(&app.server)
        .await;

    let signin = app.get("/api/auth/signin", None).await;
    let state = query_value(location(&signin), "state").unwrap().to_string();

    let response = app.get(&format!("/api/auth/callback?code=bad&state={state}"), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.ctx.sessions.session_count(), 0);
}

#[tokio::test]
async fn full_login_then_proxy_uses_issued_token() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=auth-code-1"))
        .and(body_string_contains("code_verifier="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.issued",
            "token_type": "Bearer",
            "expires_in": 3599,
            "id_token": id_token_for("student@example.com"),
        })))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("authorization", "Bearer ya29.issued"))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_envelope(3)))
        .mount(&app.server)
        .await;

    let signin = app.get("/api/auth/signin", None).await;
    let state = query_value(location(&signin), "state").unwrap().to_string();

    let callback =
        app.get(&format!("/api/auth/callback?code=auth-code-1&state={state}"), None).await;
    assert_redirect(&callback, "/dashboard");
    let cookie_header = set_cookie(&callback).unwrap();
    assert!(cookie_header.starts_with("duedash_session="));
    assert!(cookie_header.contains("HttpOnly"));
    assert!(cookie_header.contains("SameSite=Lax"));
    assert!(!cookie_header.contains("Secure"));
    let cookie = cookie_header.split(';').next().unwrap().to_string();

    let events = app.get("/api/calendar", Some(&cookie)).await;
    assert_eq!(events.status(), StatusCode::OK);
    assert_eq!(body_json(events).await["events"].as_array().unwrap().len(), 3);

    let dashboard = app.get("/dashboard", Some(&cookie)).await;
    assert!(body_text(dashboard).await.contains("student@example.com"));

    // The state was consumed; replaying the callback fails.
    let replay =
        app.get(&format!("/api/auth/callback?code=auth-code-1&state={state}"), None).await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signout_clears_session_and_cookie() {
    let app = TestApp::start().await;
    let cookie = app.sign_in("ya29.token");

    let response = app.get("/api/auth/signout", Some(&cookie)).await;

    assert_redirect(&response, "/login");
    assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    assert_eq!(app.ctx.sessions.session_count(), 0);

    let after = app.get("/api/calendar", Some(&cookie)).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_page_links_to_signin() {
    let app = TestApp::start().await;

    let response = app.get("/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Sign in with Google"));
    assert!(html.contains("href=\"/api/auth/signin\""));
}

#[tokio::test]
async fn session_ends_when_the_access_token_expires() {
    let app = TestApp::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.short",
            "token_type": "Bearer",
            "expires_in": 600,
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(events_envelope(1)))
        .mount(&app.server)
        .await;

    let signin = app.get("/api/auth/signin", None).await;
    let state = query_value(location(&signin), "state").unwrap().to_string();
    let callback = app.get(&format!("/api/auth/callback?code=c&state={state}"), None).await;
    let cookie = set_cookie(&callback).unwrap().split(';').next().unwrap().to_string();

    app.clock.advance(chrono::Duration::seconds(599));
    assert_eq!(app.get("/api/calendar", Some(&cookie)).await.status(), StatusCode::OK);

    app.clock.advance(chrono::Duration::seconds(1));
    assert_eq!(app.get("/api/calendar", Some(&cookie)).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.ctx.sessions.session_count(), 0);
}
