use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_user::User, m20251101_000003_ticket::Ticket,
    m20251101_000004_comment::Comment,
};

static IDX_ATTACHMENT_TICKET_ID: &str = "idx-attachment-ticket_id";
static IDX_ATTACHMENT_COMMENT_ID: &str = "idx-attachment-comment_id";
static FK_ATTACHMENT_TICKET_ID: &str = "fk-attachment-ticket_id";
static FK_ATTACHMENT_COMMENT_ID: &str = "fk-attachment-comment_id";
static FK_ATTACHMENT_UPLOADED_BY_ID: &str = "fk-attachment-uploaded_by_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attachment::Table)
                    .if_not_exists()
                    .col(pk_auto(Attachment::Id))
                    .col(string(Attachment::Filename))
                    .col(string(Attachment::MimeType))
                    .col(big_integer(Attachment::Size))
                    .col(text(Attachment::Url))
                    .col(integer_null(Attachment::TicketId))
                    .col(integer_null(Attachment::CommentId))
                    .col(integer(Attachment::UploadedById))
                    .col(timestamp(Attachment::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ATTACHMENT_TICKET_ID)
                    .table(Attachment::Table)
                    .col(Attachment::TicketId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ATTACHMENT_COMMENT_ID)
                    .table(Attachment::Table)
                    .col(Attachment::CommentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ATTACHMENT_TICKET_ID)
                    .from_tbl(Attachment::Table)
                    .from_col(Attachment::TicketId)
                    .to_tbl(Ticket::Table)
                    .to_col(Ticket::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ATTACHMENT_COMMENT_ID)
                    .from_tbl(Attachment::Table)
                    .from_col(Attachment::CommentId)
                    .to_tbl(Comment::Table)
                    .to_col(Comment::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ATTACHMENT_UPLOADED_BY_ID)
                    .from_tbl(Attachment::Table)
                    .from_col(Attachment::UploadedById)
                    .to_tbl(User::Table)
                    .to_col(User::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_ATTACHMENT_UPLOADED_BY_ID,
            FK_ATTACHMENT_COMMENT_ID,
            FK_ATTACHMENT_TICKET_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(Attachment::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [IDX_ATTACHMENT_COMMENT_ID, IDX_ATTACHMENT_TICKET_ID] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(Attachment::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Attachment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attachment {
    Table,
    Id,
    Filename,
    MimeType,
    Size,
    Url,
    TicketId,
    CommentId,
    UploadedById,
    CreatedAt,
}
