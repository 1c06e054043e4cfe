//! Create `submission` table.
//!
//! One row per recorded form post. `id` and `created_at` stay internal and are
//! never returned to clients.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(big_integer(Submission::Id).primary_key().auto_increment())
                    .col(text(Submission::Name).not_null())
                    .col(text(Submission::Email).not_null())
                    .col(timestamp_with_time_zone(Submission::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Submission::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Submission { Table, Id, Name, Email, CreatedAt }
