//! # DueDash App
//!
//! HTTP application layer - routes, rendering and the main entry point.
//!
//! This crate contains:
//! - axum routes (proxy endpoint, auth flow, dashboard controls)
//! - Server-rendered dashboard and login pages
//! - Application context (dependency injection)
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the calendar source, clock and session store together
//! - Maps every failure to one of two flat JSON error bodies

pub mod context;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod utils;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
