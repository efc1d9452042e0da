//! Dashboard use case: fetch through the proxy, transform, tabulate.

pub mod service;

pub use service::DashboardService;
