//! Error types for the mailfeed client.
//!
//! This module defines the centralized error type [`MailfeedError`] and a type alias
//! [`Result`] used throughout the crate. Every REST call, whichever application it
//! belongs to, funnels its failures into one of these variants so the event handler
//! can treat them uniformly.

use thiserror::Error;

/// The main error type for mailfeed operations.
///
/// Backend failures are split by where they happened: the server answered with an
/// application-level `error` field, the server answered with an unexpected status,
/// the request never got an answer, or the answer was not the JSON we expected.
///
/// # Examples
///
/// ```
/// use mailfeed::MailfeedError;
///
/// let err = MailfeedError::Application("You must log in to like a post!".to_string());
/// assert!(err.is_application());
/// assert_eq!(err.to_string(), "You must log in to like a post!");
/// ```
#[derive(Debug, Error)]
pub enum MailfeedError {
    /// The backend replied with a JSON body carrying an `error` field.
    ///
    /// The message is shown to the user verbatim (as text, never as markup).
    #[error("{0}")]
    Application(String),

    /// The backend replied with a non-2xx status and no usable error body.
    #[error("Unexpected status {status} from {endpoint}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Endpoint path that produced the status.
        endpoint: String,
    },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON shape the call expects.
    #[error("Malformed response from {endpoint}: {reason}")]
    Decode {
        /// Endpoint path that produced the body.
        endpoint: String,
        /// Parser message.
        reason: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MailfeedError {
    /// Returns `true` when the server itself rejected the operation.
    #[must_use]
    pub const fn is_application(&self) -> bool {
        matches!(self, Self::Application(_))
    }
}

impl From<reqwest::Error> for MailfeedError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A specialized `Result` type for mailfeed operations.
pub type Result<T> = std::result::Result<T, MailfeedError>;
