pub mod eligibility;
pub mod repository;
pub mod types;
