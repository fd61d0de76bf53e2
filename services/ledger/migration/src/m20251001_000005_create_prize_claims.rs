use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrizeClaims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PrizeClaims::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PrizeClaims::UserId).uuid().not_null())
                    .col(ColumnDef::new(PrizeClaims::CourseId).uuid())
                    .col(ColumnDef::new(PrizeClaims::EventId).uuid())
                    .col(ColumnDef::new(PrizeClaims::ShotId).uuid())
                    .col(ColumnDef::new(PrizeClaims::ClaimDate).date().not_null())
                    .col(ColumnDef::new(PrizeClaims::ClaimDay).date().not_null())
                    .col(ColumnDef::new(PrizeClaims::TeeTime).string())
                    .col(ColumnDef::new(PrizeClaims::TimeOfHoleInOne).string())
                    .col(ColumnDef::new(PrizeClaims::Notes).text())
                    .col(ColumnDef::new(PrizeClaims::PrizeAmount).big_integer())
                    .col(
                        ColumnDef::new(PrizeClaims::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(PrizeClaims::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PrizeClaims::Table, PrizeClaims::CourseId)
                            .to(Courses::Table, Courses::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PrizeClaims::Table, PrizeClaims::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PrizeClaims::Table, PrizeClaims::ShotId)
                            .to(Shots::Table, Shots::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .check(Expr::cust("(course_id IS NULL) <> (event_id IS NULL)"))
                    .check(Expr::cust(
                        "status IN ('pending', 'approved', 'rejected')",
                    ))
                    .to_owned(),
            )
            .await?;

        // One claim per player per business day, whatever the course or event.
        manager
            .create_index(
                Index::create()
                    .table(PrizeClaims::Table)
                    .col(PrizeClaims::UserId)
                    .col(PrizeClaims::ClaimDay)
                    .unique()
                    .name("uq_prize_claims_user_claim_day")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(PrizeClaims::Table)
                    .col(PrizeClaims::Status)
                    .col(PrizeClaims::CreatedAt)
                    .name("idx_prize_claims_status_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrizeClaims::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PrizeClaims {
    Table,
    Id,
    UserId,
    CourseId,
    EventId,
    ShotId,
    ClaimDate,
    ClaimDay,
    TeeTime,
    TimeOfHoleInOne,
    Notes,
    PrizeAmount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}

#[derive(Iden)]
enum Shots {
    Table,
    Id,
}
