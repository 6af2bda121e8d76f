//! Page title type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Characters MediaWiki never allows in a title.
const ILLEGAL_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

/// Maximum title length in bytes.
const MAX_LEN: usize = 255;

const CATEGORY_PREFIX: &str = "Category:";

/// A validated wiki page title, including any namespace prefix.
///
/// # Example
///
/// ```
/// use wikiapi::Title;
///
/// let title = Title::new("User:ExampleBot/Run").unwrap();
/// assert_eq!(title.as_str(), "User:ExampleBot/Run");
/// assert_eq!(Title::user_subpage("ExampleBot", "Run").unwrap(), title);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Create a new title from a string, validating the format.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a legal title.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        let trimmed = s.trim();
        Self::validate(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    /// The `User:<name>/<subpage>` title.
    pub fn user_subpage(user: &str, subpage: &str) -> Result<Self, Error> {
        Self::new(format!("User:{}/{}", user, subpage))
    }

    /// A category title, normalizing any `Category:` prefix the caller gave.
    ///
    /// ```
    /// use wikiapi::Title;
    ///
    /// let a = Title::category("category:Living people").unwrap();
    /// let b = Title::category("Living people").unwrap();
    /// assert_eq!(a.as_str(), "Category:Living people");
    /// assert_eq!(a, b);
    /// ```
    pub fn category(name: &str) -> Result<Self, Error> {
        let name = name.trim();
        let bare = match name.get(..CATEGORY_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(CATEGORY_PREFIX) => {
                &name[CATEGORY_PREFIX.len()..]
            }
            _ => name,
        };
        Self::new(format!("{}{}", CATEGORY_PREFIX, bare.trim_start()))
    }

    /// Returns the title string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), Error> {
        let invalid = |reason: String| -> Error {
            InvalidInputError::Title {
                value: s.to_string(),
                reason,
            }
            .into()
        };

        if s.is_empty() {
            return Err(invalid("cannot be empty".to_string()));
        }

        if s.len() > MAX_LEN {
            return Err(invalid(format!(
                "exceeds maximum length of {} bytes",
                MAX_LEN
            )));
        }

        if let Some(c) = s
            .chars()
            .find(|c| ILLEGAL_CHARS.contains(c) || c.is_control())
        {
            return Err(invalid(format!("contains invalid character {:?}", c)));
        }

        Ok(())
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Title {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Title {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Title> for String {
    fn from(title: Title) -> Self {
        title.0
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
