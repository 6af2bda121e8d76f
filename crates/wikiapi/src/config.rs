//! Client configuration.

use std::time::Duration;

use crate::types::ApiUrl;

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of redirects a GET may follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Default pause before re-checking for a revision that has not appeared yet.
pub const DEFAULT_REVISION_WAIT: Duration = Duration::from_secs(1);

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wikiapi::{ApiUrl, ClientConfig};
///
/// let api = ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap();
/// let config = ClientConfig::new(api)
///     .user_agent("ExampleBot/1.0 (ops@example.org)")
///     .timeout(Duration::from_secs(60));
/// assert_eq!(config.timeout, Duration::from_secs(60));
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// The Action API endpoint.
    pub endpoint: ApiUrl,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Time allowed for a whole request.
    pub timeout: Duration,
    /// Redirects a GET may follow. POSTs never follow redirects.
    pub max_redirects: usize,
    /// Optional HTTP proxy URL.
    pub proxy: Option<String>,
    /// Send `assert=user` on every request once logged in.
    pub assert_user: bool,
    /// Pause before re-checking for a revision that has not appeared yet.
    pub revision_wait: Duration,
}

impl ClientConfig {
    /// Configuration with defaults for the given endpoint.
    pub fn new(endpoint: ApiUrl) -> Self {
        Self {
            endpoint,
            user_agent: concat!("wikiapi/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            proxy: None,
            assert_user: true,
            revision_wait: DEFAULT_REVISION_WAIT,
        }
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn assert_user(mut self, assert_user: bool) -> Self {
        self.assert_user = assert_user;
        self
    }

    pub fn revision_wait(mut self, wait: Duration) -> Self {
        self.revision_wait = wait;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let api = ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap();
        let config = ClientConfig::new(api);
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert!(config.assert_user);
        assert!(config.proxy.is_none());
        assert!(config.user_agent.starts_with("wikiapi/"));
    }
}
