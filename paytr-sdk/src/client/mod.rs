//! HTTP client for the PayTR token endpoint.
//!
//! Gated behind the `client` cargo feature so crates that only verify
//! callbacks do not pull in `reqwest`.

mod token;

pub use token::{PaytrClient, TOKEN_ENDPOINT};

use reqwest::StatusCode;

use crate::objects::ValidationError;

/// Errors produced by [`PaytrClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request is missing fields PayTR requires; nothing was sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// PayTR returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
