use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(shots_table()).await?;

        // One shot per player, course and business day.
        manager
            .create_index(
                Index::create()
                    .table(Shots::Table)
                    .col(Shots::UserId)
                    .col(Shots::CourseId)
                    .col(Shots::PlayDay)
                    .unique()
                    .name("uq_shots_user_course_play_day")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Shots::Table)
                    .col(Shots::UserId)
                    .col(Shots::CreatedAt)
                    .name("idx_shots_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shots::Table).to_owned())
            .await
    }
}

/// Shots are never deleted, so a course with shots cannot be deleted either.
fn shots_table() -> TableCreateStatement {
    Table::create()
        .table(Shots::Table)
        .if_not_exists()
        .col(ColumnDef::new(Shots::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Shots::UserId).uuid().not_null())
        .col(ColumnDef::new(Shots::CourseId).uuid().not_null())
        .col(ColumnDef::new(Shots::PlayDay).date().not_null())
        .col(ColumnDef::new(Shots::PlayedAt).timestamp_with_time_zone())
        .col(
            ColumnDef::new(Shots::IsHoleInOne)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Shots::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Shots::Table, Shots::CourseId)
                .to(Courses::Table, Courses::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

#[derive(Iden)]
enum Shots {
    Table,
    Id,
    UserId,
    CourseId,
    PlayDay,
    PlayedAt,
    IsHoleInOne,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
