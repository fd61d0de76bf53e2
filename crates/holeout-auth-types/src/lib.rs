//! Caller identity shared across Hole Out services.
//!
//! Authentication happens upstream; services receive the verified identity as
//! gateway-injected headers and extract it with [`identity::IdentityHeaders`].

pub mod identity;
