//! Error types for the job-map API client.
//!
//! # Design
//! `NotFound` and `Forbidden` get dedicated variants because callers
//! distinguish "the resource does not exist" and "the backend rejected the
//! CSRF token" from any other unexpected status. All other non-2xx responses
//! land in `HttpError` with the raw status code and body for debugging.
//!
//! Host resolution, cookie lookup and request decoration have no error path
//! and never produce an `ApiError`.

use thiserror::Error;

/// Errors returned by `JobMapClient` build/parse methods and by
/// `Location::parse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 403, usually a missing or stale CSRF token.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The server returned a non-2xx status other than 403/404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// An origin string could not be parsed into a `Location`.
    #[error("invalid origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}
