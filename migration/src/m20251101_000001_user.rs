use sea_orm_migration::{prelude::*, schema::*};

static IDX_USER_ROLE: &str = "idx-user-role";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::ClerkUserId))
                    .col(string_uniq(User::Email))
                    .col(string_null(User::FirstName))
                    .col(string_null(User::LastName))
                    .col(text_null(User::ImageUrl))
                    .col(string_len(User::Role, 32).default("END_USER"))
                    .col(boolean(User::Suspended).default(false))
                    .col(boolean(User::IsActive).default(true))
                    .col(boolean(User::EmailNotifications).default(true))
                    .col(timestamp_null(User::LastLoginAt))
                    .col(timestamp(User::CreatedAt))
                    .col(timestamp(User::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_ROLE)
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(IDX_USER_ROLE).table(User::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    ClerkUserId,
    Email,
    FirstName,
    LastName,
    ImageUrl,
    Role,
    Suspended,
    IsActive,
    EmailNotifications,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}
