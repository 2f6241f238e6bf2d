//! Ticket voting service.
//!
//! Each user has at most one vote per ticket. The tallies stored on the ticket are recounted
//! from the vote rows in the same transaction as every change, so they never drift. Votes on
//! one ticket are serialized by locking the ticket row first.

use entity::sea_orm_active_enums::TicketStatus;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    model::ticket::VoteSummaryDto,
    server::{
        data::{ticket::TicketRepository, vote::VoteRepository},
        error::{ticket::TicketError, Error},
        model::db::{TicketModel, UserModel},
        service::ticket::get_ticket_for_update,
    },
};

/// Service for casting and retracting votes.
pub struct VoteService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoteService<'a> {
    /// Creates a new instance of VoteService.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Casts, keeps or flips the actor's vote.
    ///
    /// # Returns
    /// - `Ok(VoteSummaryDto)` - Tallies after the vote
    /// - `Err(Error::TicketError(TicketError::NotFound))` - Ticket does not exist
    /// - `Err(Error::TicketError(TicketError::TicketClosed))` - Ticket is closed
    pub async fn cast(
        &self,
        actor: &UserModel,
        ticket_id: i32,
        is_upvote: bool,
    ) -> Result<VoteSummaryDto, Error> {
        let (txn, ticket) = self.begin_vote(ticket_id).await?;
        let vote_repo = VoteRepository::new(&txn);

        match vote_repo.get_by_ticket_and_user(ticket_id, actor.id).await? {
            None => {
                vote_repo.create(ticket_id, actor.id, is_upvote).await?;
            }
            Some(vote) if vote.is_upvote != is_upvote => {
                vote_repo.update_direction(vote, is_upvote).await?;
            }
            // Same direction again
            Some(_) => {}
        }

        let summary = recount(&txn, ticket, Some(is_upvote)).await?;
        txn.commit().await?;

        Ok(summary)
    }

    /// Removes the actor's vote if there is one.
    pub async fn retract(&self, actor: &UserModel, ticket_id: i32) -> Result<VoteSummaryDto, Error> {
        let (txn, ticket) = self.begin_vote(ticket_id).await?;
        let vote_repo = VoteRepository::new(&txn);

        if let Some(vote) = vote_repo.get_by_ticket_and_user(ticket_id, actor.id).await? {
            vote_repo.delete(vote.id).await?;
        }

        let summary = recount(&txn, ticket, None).await?;
        txn.commit().await?;

        Ok(summary)
    }

    /// Opens the transaction and locks the ticket row until it ends
    async fn begin_vote(&self, ticket_id: i32) -> Result<(DatabaseTransaction, TicketModel), Error> {
        let txn = self.db.begin().await?;

        let ticket = get_ticket_for_update(&txn, ticket_id).await?;
        if ticket.status == TicketStatus::Closed {
            return Err(TicketError::TicketClosed(ticket_id).into());
        }

        Ok((txn, ticket))
    }
}

/// Recounts the ticket's votes and stores the tallies on the ticket.
async fn recount(
    txn: &DatabaseTransaction,
    ticket: TicketModel,
    user_vote: Option<bool>,
) -> Result<VoteSummaryDto, Error> {
    let (upvotes, downvotes) = VoteRepository::new(txn).tally(ticket.id).await?;
    TicketRepository::new(txn)
        .set_vote_tallies(ticket.id, upvotes, downvotes)
        .await?;

    let ticket = TicketModel {
        upvotes,
        downvotes,
        ..ticket
    };

    Ok(VoteSummaryDto {
        ticket_id: ticket.id,
        upvotes,
        downvotes,
        score: ticket.score(),
        user_vote,
    })
}
