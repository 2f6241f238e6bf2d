use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
};

pub struct VoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VoteRepository<'a, C> {
    /// Creates a new instance of [`VoteRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        ticket_id: i32,
        user_id: i32,
        is_upvote: bool,
    ) -> Result<entity::vote::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let vote = entity::vote::ActiveModel {
            is_upvote: ActiveValue::Set(is_upvote),
            ticket_id: ActiveValue::Set(ticket_id),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        vote.insert(self.db).await
    }

    pub async fn get_by_ticket_and_user(
        &self,
        ticket_id: i32,
        user_id: i32,
    ) -> Result<Option<entity::vote::Model>, DbErr> {
        entity::prelude::Vote::find()
            .filter(entity::vote::Column::TicketId.eq(ticket_id))
            .filter(entity::vote::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }

    pub async fn update_direction(
        &self,
        vote: entity::vote::Model,
        is_upvote: bool,
    ) -> Result<entity::vote::Model, DbErr> {
        let mut vote_am = vote.into_active_model();
        vote_am.is_upvote = ActiveValue::Set(is_upvote);
        vote_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        vote_am.update(self.db).await
    }

    pub async fn delete(&self, vote_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Vote::delete_by_id(vote_id)
            .exec(self.db)
            .await
    }

    /// Counts vote rows on a ticket, returning `(upvotes, downvotes)`
    pub async fn tally(&self, ticket_id: i32) -> Result<(i32, i32), DbErr> {
        let upvotes = self.count_direction(ticket_id, true).await?;
        let downvotes = self.count_direction(ticket_id, false).await?;

        Ok((upvotes, downvotes))
    }

    async fn count_direction(&self, ticket_id: i32, is_upvote: bool) -> Result<i32, DbErr> {
        let count = entity::prelude::Vote::find()
            .filter(entity::vote::Column::TicketId.eq(ticket_id))
            .filter(entity::vote::Column::IsUpvote.eq(is_upvote))
            .count(self.db)
            .await?;

        i32::try_from(count).map_err(|e| DbErr::Custom(e.to_string()))
    }
}
