//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use duedash_core::calendar::{CalendarEventSource, CalendarProxy};
use duedash_core::clock::{Clock, SystemClock};
use duedash_core::dashboard::DashboardService;
use duedash_domain::{Config, Result};
use duedash_infra::{GoogleCalendarSource, GoogleOAuthClient, HttpClient, SessionStore};
use tracing::info;

const USER_AGENT: &str = concat!("duedash/", env!("CARGO_PKG_VERSION"));

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub proxy: Arc<CalendarProxy>,
    pub dashboard: Arc<DashboardService>,
    pub oauth: GoogleOAuthClient,
    pub sessions: SessionStore,
}

impl AppContext {
    /// Wire production adapters from a validated config.
    ///
    /// # Errors
    /// Fails on invalid config or if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        let source: Arc<dyn CalendarEventSource> =
            Arc::new(GoogleCalendarSource::new(http.clone(), config.upstream_api_base_url.clone()));

        let ctx = Self::with_components(config, source, http, Arc::new(SystemClock))?;
        info!(
            upstream = %ctx.config.upstream_api_base_url,
            redirect_uri = %ctx.oauth.redirect_uri(),
            "application context initialised"
        );
        Ok(ctx)
    }

    /// Wire the context around an arbitrary event source and clock.
    ///
    /// # Errors
    /// Fails if the OAuth endpoints in `config` are not valid URLs.
    pub fn with_components(
        config: Config,
        source: Arc<dyn CalendarEventSource>,
        http: HttpClient,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let proxy = Arc::new(
            CalendarProxy::new(source, clock.clone())
                .with_timeout(Duration::from_secs(config.upstream.timeout_seconds)),
        );
        let dashboard = Arc::new(DashboardService::new(proxy.clone(), clock.clone()));
        let oauth = GoogleOAuthClient::from_config(&config, http)?;
        let sessions = SessionStore::new(
            Duration::from_secs(config.auth.login_timeout_seconds),
            Duration::from_secs(config.auth.session_ttl_seconds),
        );

        Ok(Self { config, clock, proxy, dashboard, oauth, sessions })
    }
}
