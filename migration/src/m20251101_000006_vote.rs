use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_user::User, m20251101_000003_ticket::Ticket};

static IDX_VOTE_TICKET_ID_USER_ID: &str = "idx-vote-ticket_id-user_id";
static FK_VOTE_TICKET_ID: &str = "fk-vote-ticket_id";
static FK_VOTE_USER_ID: &str = "fk-vote-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vote::Table)
                    .if_not_exists()
                    .col(pk_auto(Vote::Id))
                    .col(boolean(Vote::IsUpvote))
                    .col(integer(Vote::TicketId))
                    .col(integer(Vote::UserId))
                    .col(timestamp(Vote::CreatedAt))
                    .col(timestamp(Vote::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // One vote per user per ticket
        manager
            .create_index(
                Index::create()
                    .name(IDX_VOTE_TICKET_ID_USER_ID)
                    .table(Vote::Table)
                    .col(Vote::TicketId)
                    .col(Vote::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VOTE_TICKET_ID)
                    .from_tbl(Vote::Table)
                    .from_col(Vote::TicketId)
                    .to_tbl(Ticket::Table)
                    .to_col(Ticket::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VOTE_USER_ID)
                    .from_tbl(Vote::Table)
                    .from_col(Vote::UserId)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VOTE_USER_ID)
                    .table(Vote::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VOTE_TICKET_ID)
                    .table(Vote::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VOTE_TICKET_ID_USER_ID)
                    .table(Vote::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Vote::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Vote {
    Table,
    Id,
    IsUpvote,
    TicketId,
    UserId,
    CreatedAt,
    UpdatedAt,
}
