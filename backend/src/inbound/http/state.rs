//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without a real server.

use std::sync::Arc;

use crate::domain::ports::{AccountService, TicketService};

/// Dependency bundle for the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login use-cases.
    pub accounts: Arc<dyn AccountService>,
    /// Support ticket use-cases.
    pub tickets: Arc<dyn TicketService>,
}

impl HttpState {
    /// Bundle the two driving ports.
    pub fn new(accounts: Arc<dyn AccountService>, tickets: Arc<dyn TicketService>) -> Self {
        Self { accounts, tickets }
    }
}
