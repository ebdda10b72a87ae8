//! OpenAPI schema mirrors for domain types.
//!
//! These wrappers describe the wire shapes without coupling the domain types
//! to the utoipa framework; they are never constructed at runtime.

use serde::Serialize;
use utoipa::ToSchema;

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Stable failure category, e.g. `invalid_request` or `conflict`.
    #[schema(example = "invalid_request")]
    pub code: String,
    /// Human-readable message.
    #[schema(example = "missing required field: title")]
    pub message: String,
    /// Correlation identifier echoed from the request log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured failure details, e.g. the offending field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Support ticket as serialized by the ticket endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketSchema {
    /// Ticket identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Short summary.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// One of `technical`, `billing`, `other`.
    #[schema(example = "technical")]
    pub category: String,
    /// Owning user.
    pub user_id: String,
    /// `open` until a reply is recorded, then `closed`.
    #[schema(example = "open")]
    pub status: String,
    /// Submission timestamp, RFC 3339.
    #[schema(example = "2026-01-15T09:30:00Z")]
    pub created_at: String,
    /// Reply text; absent while the ticket is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    /// Replying administrator; absent while the ticket is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_user_id: Option<String>,
    /// Reply timestamp; absent while the ticket is open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_created_at: Option<String>,
}
