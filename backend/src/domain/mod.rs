//! Domain entities, use-cases, and ports.
//!
//! Purpose: define the strongly typed model of the support-desk workflow and
//! the port traits connecting it to adapters. Keep types immutable apart from
//! the single ticket close transition and document invariants in each type's
//! Rustdoc.

mod account_service;
mod auth;
mod error;
pub mod ports;
pub mod seed;
mod support_service;
mod ticket;
mod user;

pub use self::account_service::AccountServiceImpl;
pub use self::auth::{Credentials, CredentialsValidationError, is_admin};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::support_service::TicketServiceImpl;
pub use self::ticket::{
    Ticket, TicketAlreadyClosed, TicketCategory, TicketId, TicketReply, TicketStatus,
};
pub use self::user::{CustomerRole, Email, User, UserId, UserRole};
