use std::time::Duration;

use axum::http::StatusCode;
use duedash_domain::DueDashError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,duedash=debug";

/// Set to `json` for JSON-lines output.
pub const LOG_FORMAT_ENV: &str = "DUEDASH_LOG_FORMAT";

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Log the outcome of a handled request with structured fields.
///
/// `route` is the matched route template, never the raw path, so no query
/// values end up in the log.
#[inline]
pub fn log_request_outcome(route: &str, elapsed: Duration, status: StatusCode) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    let status = status.as_u16();

    if status < 400 {
        info!(route, status, duration_ms, "request_success");
    } else {
        warn!(route, status, duration_ms, "request_failure");
    }
}

/// Convert a `DueDashError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &DueDashError) -> &'static str {
    match error {
        DueDashError::Config(_) => "config",
        DueDashError::Network(_) => "network",
        DueDashError::Timeout(_) => "timeout",
        DueDashError::Auth(_) => "auth",
        DueDashError::Unauthorized => "unauthorized",
        DueDashError::Upstream(_) => "upstream",
        DueDashError::NotFound(_) => "not_found",
        DueDashError::InvalidInput(_) => "invalid_input",
        DueDashError::Internal(_) => "internal",
    }
}
