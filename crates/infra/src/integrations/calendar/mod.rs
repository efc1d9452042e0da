//! Google Calendar integration
//!
//! - [`GoogleCalendarSource`]: upcoming-events listing with a bearer token
//! - [`GoogleOAuthClient`]: authorization-code login with PKCE

pub mod google;
pub mod oauth;
pub mod pkce;

pub use google::GoogleCalendarSource;
pub use oauth::{extract_email_from_id_token, GoogleOAuthClient, LoginChallenge, TokenResponse};
pub use pkce::PkceChallenge;
