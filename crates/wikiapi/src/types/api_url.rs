//! Action API endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated Action API endpoint, e.g. `https://en.wikipedia.org/w/api.php`.
///
/// This is the single canonical base for every read and write; requests are
/// built by appending parameters to it, never by rewriting the path.
///
/// # Example
///
/// ```
/// use wikiapi::ApiUrl;
///
/// let api = ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap();
/// assert_eq!(api.host(), Some("en.wikipedia.org"));
/// assert_eq!(api.with_query("action=query"),
///            "https://en.wikipedia.org/w/api.php?action=query");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Parameters are always supplied per request
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the endpoint with the given encoded query string appended.
    pub fn with_query(&self, query: &str) -> String {
        if query.is_empty() {
            self.0.as_str().to_string()
        } else {
            format!("{}?{}", self.0.as_str(), query)
        }
    }

    /// Returns the endpoint URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap();
        assert_eq!(api.host(), Some("en.wikipedia.org"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8080/w/api.php").unwrap();
        assert_eq!(api.host(), Some("localhost"));
    }

    #[test]
    fn strips_existing_query() {
        let api = ApiUrl::new("https://en.wikipedia.org/w/api.php?format=xml#top").unwrap();
        assert_eq!(api.as_str(), "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn query_construction() {
        let api = ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap();
        assert_eq!(
            api.with_query("action=query&meta=tokens"),
            "https://en.wikipedia.org/w/api.php?action=query&meta=tokens"
        );
        assert_eq!(api.with_query(""), "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://en.wikipedia.org/w/api.php").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/w/api.php").is_err());
    }
}
