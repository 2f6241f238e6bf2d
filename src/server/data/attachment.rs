use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// Metadata of an uploaded file. At least one of `ticket_id` or `comment_id` is set.
#[derive(Clone, Debug)]
pub struct NewAttachment {
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    pub ticket_id: Option<i32>,
    pub comment_id: Option<i32>,
    pub uploaded_by_id: i32,
}

pub struct AttachmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttachmentRepository<'a, C> {
    /// Creates a new instance of [`AttachmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        new_attachment: NewAttachment,
    ) -> Result<entity::attachment::Model, DbErr> {
        let attachment = entity::attachment::ActiveModel {
            filename: ActiveValue::Set(new_attachment.filename),
            mime_type: ActiveValue::Set(new_attachment.mime_type),
            size: ActiveValue::Set(new_attachment.size),
            url: ActiveValue::Set(new_attachment.url),
            ticket_id: ActiveValue::Set(new_attachment.ticket_id),
            comment_id: ActiveValue::Set(new_attachment.comment_id),
            uploaded_by_id: ActiveValue::Set(new_attachment.uploaded_by_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        attachment.insert(self.db).await
    }

    pub async fn get_by_id(
        &self,
        attachment_id: i32,
    ) -> Result<Option<entity::attachment::Model>, DbErr> {
        entity::prelude::Attachment::find_by_id(attachment_id)
            .one(self.db)
            .await
    }

    /// Attachments on the ticket itself and on its comments.
    ///
    /// With `include_internal` false, attachments on internal comments are left out.
    pub async fn find_by_ticket(
        &self,
        ticket_id: i32,
        include_internal: bool,
    ) -> Result<Vec<entity::attachment::Model>, DbErr> {
        let comments: Vec<(i32, bool)> = entity::prelude::Comment::find()
            .select_only()
            .column(entity::comment::Column::Id)
            .column(entity::comment::Column::IsInternal)
            .filter(entity::comment::Column::TicketId.eq(ticket_id))
            .into_tuple()
            .all(self.db)
            .await?;

        let visible_comment_ids: Vec<i32> = comments
            .iter()
            .filter(|(_, is_internal)| include_internal || !is_internal)
            .map(|(id, _)| *id)
            .collect();
        let hidden_comment_ids: Vec<i32> = comments
            .iter()
            .filter(|(_, is_internal)| !include_internal && *is_internal)
            .map(|(id, _)| *id)
            .collect();

        let mut parent = Condition::any().add(entity::attachment::Column::TicketId.eq(ticket_id));
        if !visible_comment_ids.is_empty() {
            parent = parent.add(entity::attachment::Column::CommentId.is_in(visible_comment_ids));
        }

        let mut query = entity::prelude::Attachment::find().filter(parent);
        if !hidden_comment_ids.is_empty() {
            query = query.filter(
                Condition::any()
                    .add(entity::attachment::Column::CommentId.is_null())
                    .add(entity::attachment::Column::CommentId.is_not_in(hidden_comment_ids)),
            );
        }

        query
            .order_by_asc(entity::attachment::Column::CreatedAt)
            .order_by_asc(entity::attachment::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn delete(&self, attachment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Attachment::delete_by_id(attachment_id)
            .exec(self.db)
            .await
    }
}
