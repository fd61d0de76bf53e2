//! Service plumbing shared by Hole Out binaries: tracing setup, request ids,
//! health probes and serde helpers for HTTP responses.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
