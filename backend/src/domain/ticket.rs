//! Support ticket data model.
//!
//! A ticket moves through exactly one transition: it is created `open` and is
//! closed when an administrator records a reply. The reply fields are set
//! once, together with the close, and are never overwritten.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Stable ticket identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Closed set of ticket categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    /// Technical problems with the product.
    Technical,
    /// Billing and account questions.
    Billing,
    /// Anything else.
    Other,
}

impl TicketCategory {
    /// Parse a wire token.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::TicketCategory;
    ///
    /// assert_eq!(TicketCategory::from_token("billing"), Some(TicketCategory::Billing));
    /// assert_eq!(TicketCategory::from_token("urgent"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "technical" => Some(Self::Technical),
            "billing" => Some(Self::Billing),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Wire token for this category.
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Billing => "billing",
            Self::Other => "other",
        }
    }
}

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting an administrator reply.
    Open,
    /// A reply has been recorded; terminal.
    Closed,
}

/// Reply recorded by an administrator, closing the ticket.
///
/// Serializes flattened into the ticket as `reply`, `replyUserId`, and
/// `replyCreatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketReply {
    #[serde(rename = "reply")]
    body: String,
    #[serde(rename = "replyUserId")]
    author: UserId,
    #[serde(rename = "replyCreatedAt")]
    created_at: DateTime<Utc>,
}

impl TicketReply {
    /// Reply text.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Administrator who replied.
    pub fn author(&self) -> UserId {
        self.author
    }

    /// When the reply was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Error returned when a reply is recorded on a closed ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ticket is already closed")]
pub struct TicketAlreadyClosed;

/// Support ticket submitted by a user.
///
/// ## Invariants
/// - `status` starts [`TicketStatus::Open`] and flips to `Closed` exactly
///   once, atomically with the reply fields being set.
/// - `user_id` is the owning user and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    id: TicketId,
    title: String,
    description: String,
    category: TicketCategory,
    user_id: UserId,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    reply: Option<TicketReply>,
}

impl Ticket {
    /// Open a new ticket with a freshly generated identifier.
    pub fn open(
        title: impl Into<String>,
        description: impl Into<String>,
        category: TicketCategory,
        owner: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TicketId::random(),
            title: title.into(),
            description: description.into(),
            category,
            user_id: owner,
            status: TicketStatus::Open,
            created_at,
            reply: None,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> TicketId {
        self.id
    }

    /// Short summary supplied at submission.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text problem description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Ticket category.
    pub fn category(&self) -> TicketCategory {
        self.category
    }

    /// Owning user.
    pub fn owner(&self) -> UserId {
        self.user_id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// Submission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The recorded reply, if the ticket is closed.
    pub fn reply(&self) -> Option<&TicketReply> {
        self.reply.as_ref()
    }

    /// Whether the ticket has been closed.
    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    /// Record the administrator reply and close the ticket.
    ///
    /// Fails without touching any field when the ticket is already closed,
    /// so an earlier reply is never overwritten. Callers needing atomicity
    /// against concurrent replies must invoke this under the store lock.
    pub fn record_reply(
        &mut self,
        author: UserId,
        body: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), TicketAlreadyClosed> {
        if self.is_closed() {
            return Err(TicketAlreadyClosed);
        }
        self.reply = Some(TicketReply {
            body: body.into(),
            author,
            created_at: at,
        });
        self.status = TicketStatus::Closed;
        Ok(())
    }
}
