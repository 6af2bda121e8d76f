//! Authentication types and session state.
//!
//! This module provides the login credential, the single-use action token and
//! the per-client [`Session`].

mod credentials;
mod session;
mod tokens;

pub use credentials::Credentials;
pub use session::Session;
pub use tokens::{Token, TokenKind};
