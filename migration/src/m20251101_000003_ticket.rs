use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_user::User, m20251101_000002_category::Category};

static IDX_TICKET_STATUS: &str = "idx-ticket-status";
static IDX_TICKET_CREATOR_ID: &str = "idx-ticket-creator_id";
static IDX_TICKET_ASSIGNEE_ID: &str = "idx-ticket-assignee_id";
static IDX_TICKET_CATEGORY_ID: &str = "idx-ticket-category_id";
static FK_TICKET_CREATOR_ID: &str = "fk-ticket-creator_id";
static FK_TICKET_ASSIGNEE_ID: &str = "fk-ticket-assignee_id";
static FK_TICKET_CATEGORY_ID: &str = "fk-ticket-category_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string_len(Ticket::Subject, 200))
                    .col(text(Ticket::Description))
                    .col(string_len(Ticket::Status, 32).default("OPEN"))
                    .col(integer(Ticket::Priority).default(2))
                    .col(integer(Ticket::CreatorId))
                    .col(integer_null(Ticket::AssigneeId))
                    .col(integer(Ticket::CategoryId))
                    .col(integer(Ticket::ViewCount).default(0))
                    .col(integer(Ticket::Upvotes).default(0))
                    .col(integer(Ticket::Downvotes).default(0))
                    .col(timestamp_null(Ticket::ResolvedAt))
                    .col(timestamp_null(Ticket::ClosedAt))
                    .col(timestamp(Ticket::CreatedAt))
                    .col(timestamp(Ticket::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (IDX_TICKET_STATUS, Ticket::Status),
            (IDX_TICKET_CREATOR_ID, Ticket::CreatorId),
            (IDX_TICKET_ASSIGNEE_ID, Ticket::AssigneeId),
            (IDX_TICKET_CATEGORY_ID, Ticket::CategoryId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Ticket::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TICKET_CREATOR_ID)
                    .from_tbl(Ticket::Table)
                    .from_col(Ticket::CreatorId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TICKET_ASSIGNEE_ID)
                    .from_tbl(Ticket::Table)
                    .from_col(Ticket::AssigneeId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TICKET_CATEGORY_ID)
                    .from_tbl(Ticket::Table)
                    .from_col(Ticket::CategoryId)
                    .to_tbl(Category::Table)
                    .to_col(Category::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_TICKET_CATEGORY_ID,
            FK_TICKET_ASSIGNEE_ID,
            FK_TICKET_CREATOR_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(Ticket::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [
            IDX_TICKET_CATEGORY_ID,
            IDX_TICKET_ASSIGNEE_ID,
            IDX_TICKET_CREATOR_ID,
            IDX_TICKET_STATUS,
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Ticket::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    Subject,
    Description,
    Status,
    Priority,
    CreatorId,
    AssigneeId,
    CategoryId,
    ViewCount,
    Upvotes,
    Downvotes,
    ResolvedAt,
    ClosedAt,
    CreatedAt,
    UpdatedAt,
}
