use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct CommentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommentRepository<'a, C> {
    /// Creates a new instance of [`CommentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ticket_id: i32,
        author_id: i32,
        content: String,
        is_internal: bool,
    ) -> Result<entity::comment::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let comment = entity::comment::ActiveModel {
            content: ActiveValue::Set(content),
            is_internal: ActiveValue::Set(is_internal),
            ticket_id: ActiveValue::Set(ticket_id),
            author_id: ActiveValue::Set(author_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        comment.insert(self.db).await
    }

    pub async fn get_by_id(&self, comment_id: i32) -> Result<Option<entity::comment::Model>, DbErr> {
        entity::prelude::Comment::find_by_id(comment_id)
            .one(self.db)
            .await
    }

    /// Comments of a ticket in the order they were posted
    pub async fn find_by_ticket(
        &self,
        ticket_id: i32,
        include_internal: bool,
    ) -> Result<Vec<entity::comment::Model>, DbErr> {
        let mut query = entity::prelude::Comment::find()
            .filter(entity::comment::Column::TicketId.eq(ticket_id));

        if !include_internal {
            query = query.filter(entity::comment::Column::IsInternal.eq(false));
        }

        query
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .all(self.db)
            .await
    }

    /// Number of comments on the ticket written by anyone but `user_id`
    pub async fn count_by_others(&self, ticket_id: i32, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Comment::find()
            .filter(entity::comment::Column::TicketId.eq(ticket_id))
            .filter(entity::comment::Column::AuthorId.ne(user_id))
            .count(self.db)
            .await
    }

    /// Returns `Ok(None)` when the comment does not exist
    pub async fn update_content(
        &self,
        comment_id: i32,
        content: String,
    ) -> Result<Option<entity::comment::Model>, DbErr> {
        let Some(comment) = self.get_by_id(comment_id).await? else {
            return Ok(None);
        };

        let mut comment_am = comment.into_active_model();
        comment_am.content = ActiveValue::Set(content);
        comment_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let comment = comment_am.update(self.db).await?;

        Ok(Some(comment))
    }

    /// Deletes a comment along with its attachments
    pub async fn delete(&self, comment_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Comment::delete_by_id(comment_id)
            .exec(self.db)
            .await
    }
}
