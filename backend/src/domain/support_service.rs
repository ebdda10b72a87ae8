//! Support ticket workflow use-cases.
//!
//! Admin gating happens here, before any ticket lookup, so an unknown caller
//! and a non-admin caller are indistinguishable to clients.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::ports::{
    AdminListError, RecordReplyError, ReplyCommand, ReplyError, TicketListError,
    TicketRepository, TicketService, TicketSubmission, TicketSubmissionError, UserRepository,
};
use super::{Ticket, UserId, is_admin};

/// [`TicketService`] implementation over the identity and ticket stores.
#[derive(Clone)]
pub struct TicketServiceImpl<U, T> {
    users: Arc<U>,
    tickets: Arc<T>,
}

impl<U, T> TicketServiceImpl<U, T> {
    /// Create the service over the given stores.
    pub fn new(users: Arc<U>, tickets: Arc<T>) -> Self {
        Self { users, tickets }
    }
}

impl<U, T> TicketServiceImpl<U, T>
where
    U: UserRepository,
{
    async fn caller_is_admin(&self, id: UserId) -> Result<bool, super::ports::UserStoreError> {
        let caller = self.users.find_by_id(id).await?;
        Ok(is_admin(caller.as_ref()))
    }
}

#[async_trait]
impl<U, T> TicketService for TicketServiceImpl<U, T>
where
    U: UserRepository,
    T: TicketRepository,
{
    async fn submit(
        &self,
        submission: TicketSubmission,
    ) -> Result<Ticket, TicketSubmissionError> {
        let owner = submission.owner();
        if self.users.find_by_id(owner).await?.is_none() {
            return Err(TicketSubmissionError::UnknownUser { id: owner });
        }

        let ticket = Ticket::open(
            submission.title(),
            submission.description(),
            submission.category(),
            owner,
            Utc::now(),
        );
        self.tickets.insert(&ticket).await?;
        debug!(ticket_id = %ticket.id(), owner = %owner, "ticket submitted");
        Ok(ticket)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Ticket>, TicketListError> {
        if self.users.find_by_id(owner).await?.is_none() {
            return Err(TicketListError::UnknownUser { id: owner });
        }
        Ok(self.tickets.list_by_owner(owner).await?)
    }

    async fn list_all(&self, requester: UserId) -> Result<Vec<Ticket>, AdminListError> {
        if !self.caller_is_admin(requester).await? {
            return Err(AdminListError::NotAdmin);
        }
        Ok(self.tickets.list_all().await?)
    }

    async fn reply(&self, command: ReplyCommand) -> Result<Ticket, ReplyError> {
        if !self.caller_is_admin(command.admin()).await? {
            return Err(ReplyError::NotAdmin);
        }

        // An unresolvable identifier matches no ticket; report it only after
        // the admin gate.
        let Some(ticket_id) = command.ticket() else {
            return Err(ReplyError::UnknownTicket);
        };

        let ticket = self
            .tickets
            .record_reply(ticket_id, command.admin(), command.body(), Utc::now())
            .await
            .map_err(|err| match err {
                RecordReplyError::UnknownTicket { .. } => ReplyError::UnknownTicket,
                RecordReplyError::AlreadyClosed { .. } => ReplyError::AlreadyClosed,
                RecordReplyError::Store(err) => ReplyError::TicketStore(err),
            })?;
        debug!(ticket_id = %ticket.id(), admin = %command.admin(), "reply recorded");
        Ok(ticket)
    }
}
