//! Test utilities for Hole Out services.
//!
//! Import from dev-dependencies only; nothing here is meant for production code.

pub mod auth;
pub mod clock;
