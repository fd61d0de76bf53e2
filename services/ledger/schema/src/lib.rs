//! sea-orm entities for the ledger tables.

pub mod courses;
pub mod event_registrations;
pub mod events;
pub mod prize_claims;
pub mod shots;
pub mod single_play_credits;
