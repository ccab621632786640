//! Create gadgets table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gadgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gadgets::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gadgets::Name).string_len(255).not_null())
                    // The unique key is the real guard against concurrent duplicate codenames
                    .col(
                        ColumnDef::new(Gadgets::Codename)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Gadgets::Status)
                            .string_len(20)
                            .not_null()
                            .default("Available"),
                    )
                    .col(
                        ColumnDef::new(Gadgets::DecommissionedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Gadgets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Gadgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_status")
                    .table(Gadgets::Table)
                    .col(Gadgets::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_created_at")
                    .table(Gadgets::Table)
                    .col(Gadgets::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gadgets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Gadgets {
    Table,
    Id,
    Name,
    Codename,
    Status,
    DecommissionedAt,
    CreatedAt,
    UpdatedAt,
}
