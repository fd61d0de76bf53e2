use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventRegistrations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventRegistrations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventRegistrations::UserId).uuid().not_null())
                    .col(ColumnDef::new(EventRegistrations::EventId).uuid().not_null())
                    .col(ColumnDef::new(EventRegistrations::PaymentReference).string())
                    .col(
                        ColumnDef::new(EventRegistrations::Attended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EventRegistrations::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EventRegistrations::Table, EventRegistrations::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(EventRegistrations::Table)
                    .col(EventRegistrations::UserId)
                    .col(EventRegistrations::EventId)
                    .unique()
                    .name("uq_event_registrations_user_event")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(EventRegistrations::Table)
                    .col(EventRegistrations::EventId)
                    .col(EventRegistrations::RegisteredAt)
                    .name("idx_event_registrations_event_id_registered_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventRegistrations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EventRegistrations {
    Table,
    Id,
    UserId,
    EventId,
    PaymentReference,
    Attended,
    RegisteredAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}
