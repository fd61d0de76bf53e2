use sea_orm::entity::prelude::*;

/// A course players can log shots at. `coming_soon` courses accept no play.
/// `prize_amount` is the current hole-in-one pot in pence.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub par_3_count: Option<i32>,
    pub priority: Option<i32>,
    pub coming_soon: bool,
    pub prize_amount: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shots::Entity")]
    Shots,
}

impl Related<super::shots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
