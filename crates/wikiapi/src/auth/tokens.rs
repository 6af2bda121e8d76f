//! Action token types.

use std::fmt;

/// The kind of token requested from `meta=tokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Edit/move token, scoped to the current session.
    Csrf,
    /// Token for `action=login`.
    Login,
    /// Token for `action=rollback`.
    Rollback,
}

impl TokenKind {
    /// The `type=` value for `meta=tokens`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Csrf => "csrf",
            TokenKind::Login => "login",
            TokenKind::Rollback => "rollback",
        }
    }

    /// The key holding this token in `query.tokens`.
    pub(crate) fn response_key(&self) -> &'static str {
        match self {
            TokenKind::Csrf => "csrftoken",
            TokenKind::Login => "logintoken",
            TokenKind::Rollback => "rollbacktoken",
        }
    }
}

/// A single-use action token.
///
/// Tokens are fetched fresh for every write and consumed when the request is
/// built, so a token can never be submitted twice. After a `badtoken` error
/// a new one must be fetched.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
pub struct Token {
    kind: TokenKind,
    value: String,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Returns the kind of this token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Consume the token, yielding the value to submit.
    pub(crate) fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = Token::new(TokenKind::Csrf, "d41d8cd98f00b204e9800998ecf8427e+\\");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("d41d8cd9"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("Csrf"));
    }

    #[test]
    fn response_keys() {
        assert_eq!(TokenKind::Csrf.response_key(), "csrftoken");
        assert_eq!(TokenKind::Login.response_key(), "logintoken");
        assert_eq!(TokenKind::Rollback.response_key(), "rollbacktoken");
    }
}
