//! The Action API client.
//!
//! An [`ApiClient`] owns one [`Session`] and one [`Transport`]. Reads take
//! `&self`; [`login`](ApiClient::login) and the write operations take
//! `&mut self`, since they may change the session's identity.

mod auth;
mod gate;
mod lists;
mod lookup;
mod revisions;
mod write;

use tracing::instrument;

use crate::Result;
use crate::auth::Session;
use crate::codec::{self, Params, ResponseTree};
use crate::config::ClientConfig;
use crate::transport::{HttpTransport, Method, Transport};
use crate::types::ApiUrl;

pub use gate::RUN_PAGE;
pub use lists::{LogFilter, SearchOptions};
pub use revisions::RevisionQuery;
pub use write::EditRequest;

/// A client for one wiki's Action API.
///
/// # Example
///
/// ```no_run
/// use wikiapi::{ApiClient, ApiUrl, ClientConfig, Credentials, Direction};
///
/// # async fn example() -> Result<(), wikiapi::Error> {
/// let api = ApiUrl::new("https://test.wikipedia.org/w/api.php")?;
/// let mut client = ApiClient::new(ClientConfig::new(api))?;
///
/// if client.login(Credentials::new("ExampleBot", "bot-password")).await? {
///     let page = client.recent_changes(50, Direction::Older, None, None, None).await?;
///     for change in page.items {
///         println!("{} {}", change.timestamp, change.title);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    session: Session,
}

impl ApiClient<HttpTransport> {
    /// Create an anonymous client speaking HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (e.g. a bad proxy).
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create an anonymous client over an existing transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: Session::anonymous(),
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the endpoint every request goes to.
    pub fn endpoint(&self) -> &ApiUrl {
        &self.config.endpoint
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Parameters shared by every `action=query` read.
    fn query(&self) -> Params {
        self.with_assert(Params::action("query").set("rawcontinue", "1"))
    }

    /// Add `assert=user` when the session asks for it.
    fn with_assert(&self, params: Params) -> Params {
        params.opt("assert", self.session.asserts_user().then_some("user"))
    }

    async fn get(&self, params: &Params) -> Result<ResponseTree> {
        self.execute(Method::Get, params).await
    }

    async fn post(&self, params: &Params) -> Result<ResponseTree> {
        self.execute(Method::Post, params).await
    }

    #[instrument(skip(self, params), fields(method = method.as_str(), params = ?params))]
    async fn execute(&self, method: Method, params: &Params) -> Result<ResponseTree> {
        let request = codec::encode(&self.config.endpoint, method, params);
        let body = self.transport.send(request).await?;
        Ok(codec::decode(&body)?)
    }
}
