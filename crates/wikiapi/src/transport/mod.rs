//! HTTP transport.
//!
//! The transport is the capability "send a request to the endpoint, return
//! the body". It owns the cookie store that binds the server-side login to
//! one client, and applies the fixed timeout and redirect policy. It never
//! retries; retry policy belongs to [`ApiClient`](crate::ApiClient).

mod http;

use std::fmt;

use async_trait::async_trait;

use crate::error::TransportError;

pub use http::HttpTransport;

/// HTTP method of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// Reads. Redirects are followed.
    Get,
    /// Writes and logins. Redirects are never followed.
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// An encoded request ready to send.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Full URL, including the query string for GET requests.
    pub url: String,
    /// `application/x-www-form-urlencoded` body for POST requests.
    pub body: Option<String>,
}

// POST bodies carry passwords and tokens
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("body", &self.body.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Sends encoded requests and returns raw response bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request, returning the response body.
    ///
    /// Implementations must reuse one cookie store across calls.
    async fn send(&self, request: Request) -> Result<Vec<u8>, TransportError>;
}
