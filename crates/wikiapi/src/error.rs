//! Error types for the wikiapi library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, protocol, authentication, lookup and input validation errors.

use thiserror::Error;

/// The stale-token error code reported by the Action API.
pub(crate) const BAD_TOKEN: &str = "badtoken";

/// The unified error type for wikiapi operations.
///
/// No variant aborts the process; every failure is localized to the call
/// that produced it and the caller decides what to do next.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, HTTP status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol errors (API error markers, undecodable responses).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Authentication errors raised while recovering a write.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A page or revision the caller required does not exist.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Input validation errors (endpoint URL, page title).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the protocol error if this is one.
    pub fn as_protocol(&self) -> Option<&ProtocolError> {
        match self {
            Error::Protocol(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this error is the recoverable stale-token condition.
    pub fn is_bad_token(&self) -> bool {
        self.as_protocol().is_some_and(ProtocolError::is_bad_token)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// The HTTP client could not be constructed.
    #[error("client setup failed: {message}")]
    Setup { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Timeouts are mapped by the transport, which knows the configured limit.
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// Protocol-level errors from Action API responses.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The response carried an `error` marker.
    #[error("API error [{code}]: {info}")]
    Api { code: String, info: String },

    /// The response body could not be decoded.
    #[error("malformed response: {reason}")]
    Malformed { reason: String },

    /// The response decoded but lacks a key the operation needs.
    #[error("response is missing '{path}'")]
    MissingField { path: String },

    /// A write completed without error but did not report success.
    #[error("{action} was not applied: {result}")]
    Rejected { action: String, result: String },
}

impl ProtocolError {
    /// Create an API error from the server's code and message.
    pub fn api(code: impl Into<String>, info: impl Into<String>) -> Self {
        Self::Api {
            code: code.into(),
            info: info.into(),
        }
    }

    /// Returns the server-provided error code, if this is an API error.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProtocolError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if this is the stale-token error.
    pub fn is_bad_token(&self) -> bool {
        self.code() == Some(BAD_TOKEN)
    }
}

/// Authentication-related errors.
///
/// Bad credentials on [`login`](crate::ApiClient::login) are reported as
/// `Ok(false)`; these variants only surface from the write recovery path.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A stale token was reported but no credential was ever stored.
    #[error("no stored credentials to re-authenticate with")]
    NoCredentials,

    /// Re-authentication with the stored credential was refused.
    #[error("re-login as '{user}' failed")]
    ReloginFailed { user: String },
}

/// A page or revision that does not exist.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// The page does not exist or has no revisions.
    #[error("no such page: {title}")]
    Page { title: String },

    /// The requested revision did not appear, even after waiting.
    #[error("revision {revid} of {title} not found")]
    Revision { title: String, revid: u64 },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API endpoint URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid page title.
    #[error("invalid title '{value}': {reason}")]
    Title { value: String, reason: String },
}
