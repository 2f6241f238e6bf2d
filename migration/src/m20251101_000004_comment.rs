use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000001_user::User, m20251101_000003_ticket::Ticket};

static IDX_COMMENT_TICKET_ID: &str = "idx-comment-ticket_id";
static FK_COMMENT_TICKET_ID: &str = "fk-comment-ticket_id";
static FK_COMMENT_AUTHOR_ID: &str = "fk-comment-author_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(text(Comment::Content))
                    .col(boolean(Comment::IsInternal).default(false))
                    .col(integer(Comment::TicketId))
                    .col(integer(Comment::AuthorId))
                    .col(timestamp(Comment::CreatedAt))
                    .col(timestamp(Comment::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_COMMENT_TICKET_ID)
                    .table(Comment::Table)
                    .col(Comment::TicketId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMMENT_TICKET_ID)
                    .from_tbl(Comment::Table)
                    .from_col(Comment::TicketId)
                    .to_tbl(Ticket::Table)
                    .to_col(Ticket::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_COMMENT_AUTHOR_ID)
                    .from_tbl(Comment::Table)
                    .from_col(Comment::AuthorId)
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
                    .name(FK_COMMENT_AUTHOR_ID)
                    .table(Comment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_COMMENT_TICKET_ID)
                    .table(Comment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_COMMENT_TICKET_ID)
                    .table(Comment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Comment {
    Table,
    Id,
    Content,
    IsInternal,
    TicketId,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
