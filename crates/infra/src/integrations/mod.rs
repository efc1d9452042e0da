//! External service integrations

pub mod calendar;
