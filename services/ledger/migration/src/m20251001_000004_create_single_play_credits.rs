use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SinglePlayCredits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SinglePlayCredits::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SinglePlayCredits::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(SinglePlayCredits::PaymentReference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(SinglePlayCredits::PurchasedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SinglePlayCredits::UsedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(SinglePlayCredits::RedeemedOn).date())
                    .col(ColumnDef::new(SinglePlayCredits::CourseId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SinglePlayCredits::Table, SinglePlayCredits::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    // used_at and redeemed_on are set together or not at all.
                    .check(Expr::cust("(used_at IS NULL) = (redeemed_on IS NULL)"))
                    .to_owned(),
            )
            .await?;

        // At most one redemption per player per business day. NULLs are distinct,
        // so unredeemed credits never collide.
        manager
            .create_index(
                Index::create()
                    .table(SinglePlayCredits::Table)
                    .col(SinglePlayCredits::UserId)
                    .col(SinglePlayCredits::RedeemedOn)
                    .unique()
                    .name("uq_single_play_credits_user_redeemed_on")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(SinglePlayCredits::Table)
                    .col(SinglePlayCredits::UserId)
                    .col(SinglePlayCredits::PurchasedAt)
                    .name("idx_single_play_credits_user_id_purchased_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SinglePlayCredits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SinglePlayCredits {
    Table,
    Id,
    UserId,
    PaymentReference,
    PurchasedAt,
    UsedAt,
    RedeemedOn,
    CourseId,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}
