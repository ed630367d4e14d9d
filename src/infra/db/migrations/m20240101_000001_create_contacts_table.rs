//! Migration: Create the contacts table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::Name).string_len(80).not_null())
                    // Text, so leading zeros are preserved
                    .col(ColumnDef::new(Contacts::Phone).string_len(9).not_null())
                    .col(ColumnDef::new(Contacts::Email).string_len(50).not_null())
                    .col(ColumnDef::new(Contacts::OwnerUserId).string().not_null())
                    .col(
                        ColumnDef::new(Contacts::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Contacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contacts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Every query filters on the owner
        manager
            .create_index(
                Index::create()
                    .name("idx_contacts_owner_user_id")
                    .table(Contacts::Table)
                    .col(Contacts::OwnerUserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_contacts_owner_user_id")
                    .table(Contacts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
    Name,
    Phone,
    Email,
    OwnerUserId,
    Version,
    CreatedAt,
    UpdatedAt,
}
