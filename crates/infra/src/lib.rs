//! # DueDash Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client plumbing and error classification
//! - The Google Calendar event source and OAuth client
//! - The in-memory session store
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `duedash-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod session;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::calendar::{GoogleCalendarSource, GoogleOAuthClient, LoginChallenge};
pub use session::SessionStore;
