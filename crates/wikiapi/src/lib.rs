//! wikiapi - MediaWiki Action API client
//!
//! This library talks to one wiki's Action API endpoint through a single
//! [`ApiClient`]. The client owns its session: logging in, reading pages and
//! lists, and making gated writes all go through it.
//!
//! Writes are only submitted while the logged-in user's `User:<name>/Run`
//! page says so (see [`ApiClient::allowed_to_run`]), and a stale edit token is
//! recovered from at most once per write.
//!
//! # Example
//!
//! ```no_run
//! use wikiapi::{ApiClient, ApiUrl, ClientConfig, Credentials, EditRequest, Title, WriteOutcome};
//!
//! # async fn example() -> Result<(), wikiapi::Error> {
//! let api = ApiUrl::new("https://test.wikipedia.org/w/api.php")?;
//! let mut client = ApiClient::new(ClientConfig::new(api))?;
//!
//! if !client.login(Credentials::new("ExampleBot", "bot-password")).await? {
//!     return Ok(());
//! }
//!
//! let title = Title::new("User:ExampleBot/Sandbox")?;
//! let edit = EditRequest::new(title, "Hello").summary("test");
//! match client.edit(&edit).await? {
//!     WriteOutcome::Applied(result) => println!("saved revision {:?}", result.newrevid),
//!     WriteOutcome::Denied => println!("run page disallows edits"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod records;
pub mod transport;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Session};
pub use client::{ApiClient, EditRequest, LogFilter, RevisionQuery, SearchOptions};
pub use config::ClientConfig;
pub use error::Error;
pub use records::{Cursor, Page, WriteOutcome};
pub use types::{ApiUrl, Direction, RedirectFilter, SearchWhat, SortOrder, Title};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
