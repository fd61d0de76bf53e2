pub mod claim;
pub mod course;
pub mod credit;
pub mod eligibility;
pub mod event;
pub mod shot;
