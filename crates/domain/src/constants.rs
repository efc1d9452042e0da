//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Upstream calendar query
pub const UPSTREAM_MAX_RESULTS: u32 = 50;
pub const UPSTREAM_ORDER_BY: &str = "startTime";
pub const UPSTREAM_FIELD_PROJECTION: &str =
    "items(id,summary,description,start,end,status,organizer,location)";

// Assignment derivation
pub const DEFAULT_SUBJECT: &str = "General";
pub const DEFAULT_TIME_ZONE: &str = "UTC";
pub const HIGH_PRIORITY_MAX_DAYS: i64 = 2;
pub const MEDIUM_PRIORITY_MAX_DAYS: i64 = 5;
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Table presentation
pub const PAGE_SIZE: usize = 10;

// Identity provider
pub const GOOGLE_AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

// HTTP surface
pub const SESSION_COOKIE_NAME: &str = "duedash_session";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 600;
/// Upper bound on a session; shorter when the provider reports `expires_in`.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
