//! reqwest-backed transport.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::redirect;
use tracing::{debug, instrument, trace};

use crate::config::ClientConfig;
use crate::error::TransportError;

use super::{Method, Request, Transport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP transport for Action API requests.
///
/// Holds two HTTP clients sharing one in-memory cookie jar: reads follow
/// redirects, writes do not, since re-posting after a redirect could repeat
/// the write. The jar lives only as long as the transport.
#[derive(Debug)]
pub struct HttpTransport {
    get: reqwest::Client,
    post: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the TLS backend cannot
    /// be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let cookies = Arc::new(Jar::default());

        let get = Self::builder(config, &cookies)?
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(setup_error)?;

        let post = Self::builder(config, &cookies)?
            .redirect(redirect::Policy::none())
            .build()
            .map_err(setup_error)?;

        Ok(Self {
            get,
            post,
            timeout: config.timeout,
        })
    }

    fn builder(
        config: &ClientConfig,
        cookies: &Arc<Jar>,
    ) -> Result<reqwest::ClientBuilder, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .cookie_provider(Arc::clone(cookies))
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout);

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(setup_error)?);
        }

        Ok(builder)
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            TransportError::from(err)
        }
    }
}

fn setup_error(err: reqwest::Error) -> TransportError {
    TransportError::Setup {
        message: err.to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(method = request.method.as_str()))]
    async fn send(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        let started = Instant::now();

        let builder = match request.method {
            Method::Get => {
                trace!(url = %request.url, "GET");
                self.get.get(&request.url)
            }
            Method::Post => self
                .post
                .post(&request.url)
                .header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
                .body(request.body.unwrap_or_default()),
        };

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();

        if !status.is_success() {
            debug!(status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        Ok(body.to_vec())
    }
}
