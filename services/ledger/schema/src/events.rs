use sea_orm::entity::prelude::*;

/// A competition round. Registration is open only while `enabled`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub round: String,
    pub region: String,
    pub venue: String,
    pub date: Date,
    pub entry_fee: i64,
    pub nearest_pin_prize: Option<i64>,
    pub enabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    EventRegistrations,
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventRegistrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
