use sea_orm::entity::prelude::*;

/// A hole-in-one prize claim.
///
/// Exactly one of `course_id` / `event_id` is set. `prize_amount` is a snapshot
/// taken at submission. Unique on (user_id, claim_day).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prize_claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub shot_id: Option<Uuid>,
    pub claim_date: Date,
    pub claim_day: Date,
    pub tee_time: Option<String>,
    pub time_of_hole_in_one: Option<String>,
    pub notes: Option<String>,
    pub prize_amount: Option<i64>,
    /// "pending" | "approved" | "rejected"
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
