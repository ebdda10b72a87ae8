//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to reach its stores; driving
//! ports are the use-cases inbound adapters call. Each trait exposes strongly
//! typed errors so adapters map failures into predictable variants instead of
//! returning `anyhow::Result`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{
    Credentials, CustomerRole, Email, Ticket, TicketCategory, TicketId, User, UserId,
};

/// Failures surfaced by the identity store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// The store could not be accessed, e.g. a poisoned lock.
    #[error("user store access failed: {message}")]
    Access {
        /// Adapter-specific description of the fault.
        message: String,
    },
}

impl UserStoreError {
    /// Helper for access failures.
    pub fn access(message: impl Into<String>) -> Self {
        Self::Access {
            message: message.into(),
        }
    }
}

/// Failures surfaced by the ticket store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketStoreError {
    /// The store could not be accessed, e.g. a poisoned lock.
    #[error("ticket store access failed: {message}")]
    Access {
        /// Adapter-specific description of the fault.
        message: String,
    },
}

impl TicketStoreError {
    /// Helper for access failures.
    pub fn access(message: impl Into<String>) -> Self {
        Self::Access {
            message: message.into(),
        }
    }
}

/// Outcome of the atomic reply mutation on the ticket store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordReplyError {
    /// No ticket has the given identifier.
    #[error("ticket {id} does not exist")]
    UnknownTicket {
        /// The identifier that matched nothing.
        id: TicketId,
    },
    /// The ticket was closed by an earlier reply.
    #[error("ticket {id} is already closed")]
    AlreadyClosed {
        /// The closed ticket.
        id: TicketId,
    },
    /// The store itself failed.
    #[error(transparent)]
    Store(#[from] TicketStoreError),
}

/// Persistence port for user accounts.
///
/// Lookups are exact-equality scans; the store enforces no email uniqueness
/// itself, callers pre-check with [`UserRepository::email_exists`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Append a fully-formed user record.
    async fn insert(&self, user: &User) -> Result<(), UserStoreError>;

    /// Find the first account matching the credentials.
    async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, UserStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Whether any account uses the given email.
    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError>;
}

/// Persistence port for support tickets.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Append a fully-formed ticket.
    async fn insert(&self, ticket: &Ticket) -> Result<(), TicketStoreError>;

    /// All tickets owned by the given user, in insertion order.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Ticket>, TicketStoreError>;

    /// Every ticket, in insertion order.
    async fn list_all(&self) -> Result<Vec<Ticket>, TicketStoreError>;

    /// Fetch a ticket by identifier.
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>, TicketStoreError>;

    /// Record a reply and close the ticket as one atomic step.
    ///
    /// The open-check and the closing mutation must not be separable by a
    /// concurrent reply to the same ticket; adapters serialize them, e.g.
    /// under the store lock.
    async fn record_reply(
        &self,
        id: TicketId,
        author: UserId,
        body: &str,
        at: DateTime<Utc>,
    ) -> Result<Ticket, RecordReplyError>;
}

/// Validated registration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: Email,
    password: String,
    role: CustomerRole,
}

impl Registration {
    /// Bundle already-validated registration fields.
    pub fn new(
        name: impl Into<String>,
        email: Email,
        password: impl Into<String>,
        role: CustomerRole,
    ) -> Self {
        Self {
            name: name.into(),
            email,
            password: password.into(),
            role,
        }
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login email for the new account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password for the new account.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested customer role.
    pub fn role(&self) -> CustomerRole {
        self.role
    }
}

/// Validated ticket submission command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSubmission {
    title: String,
    description: String,
    category: TicketCategory,
    owner: UserId,
}

impl TicketSubmission {
    /// Bundle already-validated submission fields.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: TicketCategory,
        owner: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            owner,
        }
    }

    /// Short summary of the problem.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Requested category.
    pub fn category(&self) -> TicketCategory {
        self.category
    }

    /// Claimed owning user.
    pub fn owner(&self) -> UserId {
        self.owner
    }
}

/// Validated reply command.
///
/// `ticket` is `None` when the inbound identifier cannot name any ticket
/// (e.g. it is not a UUID); the service reports it as unknown only after the
/// admin gate so the failure ordering matches the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCommand {
    ticket: Option<TicketId>,
    body: String,
    admin: UserId,
}

impl ReplyCommand {
    /// Bundle already-validated reply fields.
    pub fn new(ticket: Option<TicketId>, body: impl Into<String>, admin: UserId) -> Self {
        Self {
            ticket,
            body: body.into(),
            admin,
        }
    }

    /// Target ticket, when the inbound identifier was resolvable.
    pub fn ticket(&self) -> Option<TicketId> {
        self.ticket
    }

    /// Reply text.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Claimed administrator.
    pub fn admin(&self) -> UserId {
        self.admin
    }
}

/// Failures of the register operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Another account already uses this email.
    #[error("email {email} is already registered")]
    DuplicateEmail {
        /// The contested email.
        email: Email,
    },
    /// The identity store failed.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Failures of the login operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// No account matches the email/password pair.
    #[error("email or password is incorrect")]
    InvalidCredentials,
    /// The identity store failed.
    #[error(transparent)]
    Store(#[from] UserStoreError),
}

/// Failures of the submit-ticket operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketSubmissionError {
    /// The claimed owner does not resolve to an account.
    #[error("user {id} does not exist")]
    UnknownUser {
        /// The identifier that matched nothing.
        id: UserId,
    },
    /// The identity store failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// The ticket store failed.
    #[error(transparent)]
    TicketStore(#[from] TicketStoreError),
}

/// Failures of the owner ticket listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketListError {
    /// The claimed owner does not resolve to an account.
    #[error("user {id} does not exist")]
    UnknownUser {
        /// The identifier that matched nothing.
        id: UserId,
    },
    /// The identity store failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// The ticket store failed.
    #[error(transparent)]
    TicketStore(#[from] TicketStoreError),
}

/// Failures of the admin-only full listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminListError {
    /// The caller is unknown or not an administrator.
    #[error("only administrators may view every ticket")]
    NotAdmin,
    /// The identity store failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// The ticket store failed.
    #[error(transparent)]
    TicketStore(#[from] TicketStoreError),
}

/// Failures of the admin reply operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    /// The caller is unknown or not an administrator.
    #[error("only administrators may reply to tickets")]
    NotAdmin,
    /// The target ticket does not exist.
    #[error("ticket does not exist")]
    UnknownTicket,
    /// The target ticket was closed by an earlier reply.
    #[error("ticket is already closed")]
    AlreadyClosed,
    /// The identity store failed.
    #[error(transparent)]
    UserStore(#[from] UserStoreError),
    /// The ticket store failed.
    #[error(transparent)]
    TicketStore(#[from] TicketStoreError),
}

/// Driving port for account registration and login.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a new customer account with a unique email.
    async fn register(&self, registration: Registration) -> Result<User, RegistrationError>;

    /// Look up the account matching the credentials.
    async fn login(&self, credentials: Credentials) -> Result<User, LoginError>;
}

/// Driving port for the support ticket workflow.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Open a ticket on behalf of an existing user.
    async fn submit(&self, submission: TicketSubmission)
    -> Result<Ticket, TicketSubmissionError>;

    /// Tickets owned by the given user, in submission order.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Ticket>, TicketListError>;

    /// Every ticket, in submission order; administrators only.
    async fn list_all(&self, requester: UserId) -> Result<Vec<Ticket>, AdminListError>;

    /// Record an administrator reply, closing the ticket.
    async fn reply(&self, command: ReplyCommand) -> Result<Ticket, ReplyError>;
}
