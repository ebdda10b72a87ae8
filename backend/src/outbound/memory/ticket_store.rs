//! In-memory ticket store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{RecordReplyError, TicketRepository, TicketStoreError};
use crate::domain::{Ticket, TicketId, UserId};

/// [`TicketRepository`] adapter over a mutex-guarded `Vec`.
///
/// The single mutex also provides the reply atomicity the port demands: the
/// open-check and the closing mutation happen under one lock acquisition, so
/// two racing replies to the same ticket cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryTicketStore {
    tickets: Mutex<Vec<Ticket>>,
}

impl InMemoryTicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<Ticket>>, TicketStoreError> {
        self.tickets
            .lock()
            .map_err(|_| TicketStoreError::access("ticket store mutex poisoned"))
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketStoreError> {
        self.guard()?.push(ticket.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Ticket>, TicketStoreError> {
        let tickets = self.guard()?;
        Ok(tickets
            .iter()
            .filter(|ticket| ticket.owner() == owner)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Ticket>, TicketStoreError> {
        let tickets = self.guard()?;
        Ok(tickets.clone())
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, TicketStoreError> {
        let tickets = self.guard()?;
        Ok(tickets.iter().find(|ticket| ticket.id() == id).cloned())
    }

    async fn record_reply(
        &self,
        id: TicketId,
        author: UserId,
        body: &str,
        at: DateTime<Utc>,
    ) -> Result<Ticket, RecordReplyError> {
        let mut tickets = self.guard()?;
        let ticket = tickets
            .iter_mut()
            .find(|ticket| ticket.id() == id)
            .ok_or(RecordReplyError::UnknownTicket { id })?;
        ticket
            .record_reply(author, body, at)
            .map_err(|_| RecordReplyError::AlreadyClosed { id })?;
        Ok(ticket.clone())
    }
}
