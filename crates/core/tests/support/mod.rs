//! Shared test helpers for `duedash-core` integration tests.

pub mod calendar;
