//! Error types for the to-do API client.
//!
//! # Design
//! `Unauthorized` and `NotFound` get dedicated variants because callers
//! routinely branch on "bad session" and "no such task". All other non-2xx
//! responses land in `HttpError` with the raw status code and body.
//! `Transport` covers failures where no response was received at all.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `ApiClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401, the session cookie was missing or rejected.
    #[error("session rejected by server")]
    Unauthorized,

    /// The server returned 404, the requested task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 401 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connect, TLS, header or I/O failure).
    #[error("transport failed: {0}")]
    Transport(String),
}
