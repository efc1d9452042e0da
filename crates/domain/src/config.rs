//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    CALENDAR_READONLY_SCOPE, DEFAULT_BASE_URL, DEFAULT_BIND_ADDRESS, DEFAULT_LOGIN_TIMEOUT_SECS,
    DEFAULT_SESSION_TTL_SECS, DEFAULT_UPSTREAM_TIMEOUT_SECS, GOOGLE_AUTHORIZATION_ENDPOINT,
    GOOGLE_TOKEN_ENDPOINT,
};
use crate::errors::{DueDashError, Result};

/// Application configuration
///
/// The three top-level provider fields are required; the nested sections
/// fall back to defaults when omitted from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider_client_id: String,
    #[serde(skip_serializing)]
    pub provider_client_secret: String,
    /// Calendar events listing endpoint (e.g.
    /// `https://www.googleapis.com/calendar/v3/calendars/primary/events`).
    pub upstream_api_base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Identity provider endpoints and login settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub scopes: Vec<String>,
    pub login_timeout_seconds: u64,
    pub session_ttl_seconds: u64,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Public origin used to build the OAuth redirect URI.
    pub base_url: String,
}

/// Upstream calendar API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub timeout_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            scopes: vec![
                "openid".to_string(),
                "email".to_string(),
                "profile".to_string(),
                CALENDAR_READONLY_SCOPE.to_string(),
            ],
            login_timeout_seconds: DEFAULT_LOGIN_TIMEOUT_SECS,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self { timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECS }
    }
}

impl Config {
    /// Build a config from the three required options, defaults elsewhere.
    pub fn new(
        provider_client_id: impl Into<String>,
        provider_client_secret: impl Into<String>,
        upstream_api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            provider_client_id: provider_client_id.into(),
            provider_client_secret: provider_client_secret.into(),
            upstream_api_base_url: upstream_api_base_url.into(),
            auth: AuthConfig::default(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }

    /// Reject configurations the server cannot start with.
    ///
    /// # Errors
    /// Returns `DueDashError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("provider_client_id", &self.provider_client_id),
            ("provider_client_secret", &self.provider_client_secret),
            ("upstream_api_base_url", &self.upstream_api_base_url),
            ("server.base_url", &self.server.base_url),
            ("server.bind_address", &self.server.bind_address),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(DueDashError::Config(format!("{name} must not be empty")));
            }
        }

        if self.upstream.timeout_seconds == 0 {
            return Err(DueDashError::Config(
                "upstream.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if self.auth.session_ttl_seconds == 0 {
            return Err(DueDashError::Config(
                "auth.session_ttl_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// OAuth redirect URI derived from the public base URL.
    pub fn redirect_uri(&self) -> String {
        format!("{}/api/auth/callback", self.server.base_url.trim_end_matches('/'))
    }
}
