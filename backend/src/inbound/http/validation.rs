//! Shared validation helpers for the HTTP handlers.
//!
//! Every payload field arrives as `Option<String>` so absence and emptiness
//! can be reported identically. Values are not trimmed: lookups compare
//! exact strings.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for wire field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Error for a field that is absent or empty.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Error for a `userId` that resolves to no account.
///
/// Unresolvable and unknown user identifiers surface through the same
/// failure, as a bad request.
pub(crate) fn unknown_user_error() -> Error {
    Error::invalid_request("user not found").with_details(json!({
        "field": "userId",
        "code": "unknown_user",
    }))
}

/// Reject absent or empty fields, pass everything else through untouched.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing_field_error(field)),
    }
}
