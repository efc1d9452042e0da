//! Google sign-in via the OAuth2 authorization-code flow with PKCE.
//!
//! The server builds the authorization URL, keeps the verifier keyed by the
//! CSRF state, and exchanges the returned code for tokens. Only the access
//! token is used afterwards: it becomes the session's bearer token.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use duedash_domain::{Config, DueDashError, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::pkce::PkceChallenge;
use crate::http::HttpClient;

/// Client for the provider's authorization and token endpoints
#[derive(Clone)]
pub struct GoogleOAuthClient {
    http: HttpClient,
    client_id: String,
    client_secret: String,
    authorization_endpoint: String,
    token_endpoint: String,
    redirect_uri: String,
    scopes: Vec<String>,
    extra_authorize_params: Vec<(String, String)>,
}

/// Everything needed to send the browser off and later finish the login
#[derive(Debug, Clone)]
pub struct LoginChallenge {
    pub authorization_url: String,
    pub state: String,
    pub code_verifier: String,
}

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl GoogleOAuthClient {
    /// Build from application config.
    ///
    /// # Errors
    /// `DueDashError::Config` when either endpoint is not an absolute URL.
    pub fn from_config(config: &Config, http: HttpClient) -> Result<Self> {
        validate_endpoint(&config.auth.authorization_endpoint)?;
        validate_endpoint(&config.auth.token_endpoint)?;

        Ok(Self {
            http,
            client_id: config.provider_client_id.clone(),
            client_secret: config.provider_client_secret.clone(),
            authorization_endpoint: config.auth.authorization_endpoint.clone(),
            token_endpoint: config.auth.token_endpoint.clone(),
            redirect_uri: config.redirect_uri(),
            scopes: config.auth.scopes.clone(),
            // Offline access plus forced consent so a fresh token is always issued.
            extra_authorize_params: vec![
                ("prompt".to_string(), "consent".to_string()),
                ("access_type".to_string(), "offline".to_string()),
            ],
        })
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Create a fresh PKCE challenge and the authorization URL carrying it.
    pub fn begin_login(&self) -> LoginChallenge {
        let challenge = PkceChallenge::generate();
        let scope = self.scopes.join(" ");

        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", challenge.state.as_str()),
            ("code_challenge", challenge.code_challenge.as_str()),
            ("code_challenge_method", challenge.challenge_method()),
        ];
        params.extend(self.extra_authorize_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if self.authorization_endpoint.contains('?') { '&' } else { '?' };
        let authorization_url = format!("{}{separator}{query_string}", self.authorization_endpoint);

        LoginChallenge {
            authorization_url,
            state: challenge.state,
            code_verifier: challenge.code_verifier,
        }
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    /// Any rejection by the token endpoint becomes `DueDashError::Auth`;
    /// transport failures keep their network/timeout classification.
    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenResponse> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ];

        let request = self.http.request(Method::POST, self.token_endpoint.as_str()).form(&form);

        let tokens: TokenResponse = self.http.send_json(request).await.map_err(|err| match err {
            DueDashError::Network(_) | DueDashError::Timeout(_) => err,
            DueDashError::Auth(msg) | DueDashError::Upstream(msg) | DueDashError::NotFound(msg) => {
                warn!(error = %msg, "token exchange rejected");
                DueDashError::Auth(format!("token exchange failed: {msg}"))
            }
            other => DueDashError::Auth(format!("token exchange failed: {other}")),
        })?;

        debug!(has_id_token = tokens.id_token.is_some(), "token exchange succeeded");
        Ok(tokens)
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint)
        .map_err(|err| DueDashError::Config(format!("invalid OAuth endpoint URL: {err}")))?;

    if url.host_str().is_none() {
        return Err(DueDashError::Config("OAuth endpoint missing host".to_string()));
    }
    Ok(())
}

/// Extract the `email` claim from an ID token (JWT) payload.
///
/// The signature is not checked: the token came straight from the token
/// endpoint over TLS and is only used for display.
pub fn extract_email_from_id_token(id_token: &str) -> Result<String> {
    let parts: Vec<&str> = id_token.split('.').collect();
    if parts.len() != 3 {
        return Err(DueDashError::InvalidInput("invalid ID token format".into()));
    }

    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).map_err(|err| {
        DueDashError::InvalidInput(format!("failed to decode ID token payload: {err}"))
    })?;

    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes).map_err(|err| {
        DueDashError::InvalidInput(format!("failed to parse ID token payload: {err}"))
    })?;

    payload
        .get("email")
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| DueDashError::InvalidInput("email claim missing from ID token".into()))
}
