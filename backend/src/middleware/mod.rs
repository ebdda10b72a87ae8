//! Actix middleware.

pub mod request_log;

pub use request_log::{REQUEST_ID_HEADER, RequestId, RequestLog};
