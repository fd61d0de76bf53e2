//! Domain types shared across Hole Out services.
//!
//! Pure types with no framework dependencies. Safe to import from `domain/` and
//! `usecase/` layers; persistence and HTTP concerns stay in the services.

pub mod clock;
pub mod day;
pub mod id;
pub mod money;
pub mod pagination;
pub mod role;
