//! Error types for the expense API client.
//!
//! # Design
//! Every non-2xx response lands in `Http` with the raw status code and body.
//! There is no dedicated not-found variant: the view surfaces every failure
//! the same way, as one banner string built from `Display`.

use thiserror::Error;

/// Errors returned by `ExpenseClient` and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// The host failed to complete the round trip.
    #[error("request failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
