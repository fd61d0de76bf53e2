use sea_orm::entity::prelude::*;

/// A purchased one-time play.
///
/// `payment_reference` is the checkout session id and is unique, which makes
/// credit creation idempotent. `used_at` goes from NULL to a timestamp exactly
/// once; `redeemed_on` mirrors its calendar day and is unique per user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "single_play_credits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub payment_reference: String,
    pub purchased_at: chrono::DateTime<chrono::Utc>,
    pub used_at: Option<chrono::DateTime<chrono::Utc>>,
    pub redeemed_on: Option<Date>,
    pub course_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
