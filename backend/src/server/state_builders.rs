//! Wiring helpers assembling handler state from concrete adapters.

use std::sync::Arc;

use crate::domain::{AccountServiceImpl, TicketServiceImpl, seed};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryTicketStore, InMemoryUserStore};

/// Build handler state over fresh in-memory stores seeded with the fixture
/// accounts.
///
/// Every call creates independent stores; tests rely on this isolation.
pub fn build_http_state() -> HttpState {
    let users = Arc::new(InMemoryUserStore::with_accounts(seed::seed_accounts()));
    let tickets = Arc::new(InMemoryTicketStore::new());

    HttpState::new(
        Arc::new(AccountServiceImpl::new(users.clone())),
        Arc::new(TicketServiceImpl::new(users, tickets)),
    )
}
