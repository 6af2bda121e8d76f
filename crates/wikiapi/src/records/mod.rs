//! Typed records decoded from responses.
//!
//! Every record is an immutable snapshot of one response. List operations
//! return a [`Page`] of records together with the [`Cursor`] that continues
//! the same enumeration.

mod list;
mod revision;
mod write;

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

pub use list::{
    Backlink, CategoryInfo, CategoryMember, LogEntry, PageRecord, RecentChange, SearchHit,
    Transclusion, UserContrib, UserInfo, UserRecord,
};
pub use revision::{PageRevisions, RevisionRecord};
pub(crate) use revision::RawPage;
pub use write::{EditResult, MoveResult, RollbackResult, WriteOutcome};

/// A record type produced by a `list=` module.
pub trait ListItem: DeserializeOwned {
    /// The `list=` module name, also the key under `query`.
    const MODULE: &'static str;

    /// The parameter that caps the page size.
    const LIMIT_PARAM: &'static str;

    /// The parameter that carries this module's continuation value.
    const CONTINUE_PARAM: &'static str;
}

/// An opaque continuation value for enumerating `T` records.
///
/// A cursor is only accepted by the operation that produced it: the item type
/// parameter keeps cursors of different operations apart.
pub struct Cursor<T> {
    value: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    /// Wrap a continuation value, e.g. one printed by an earlier run.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _item: PhantomData,
        }
    }

    /// The value to echo back verbatim.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// One page of a list enumeration.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// The records in this page.
    pub items: Vec<T>,

    /// Cursor for the next page; `None` once the enumeration is exhausted.
    pub cursor: Option<Cursor<T>>,
}

impl<T> Page<T> {
    /// Whether another call can continue the enumeration.
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Deserialize a timestamp that may be absent, `null` or an empty string.
pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_equality_and_display() {
        let a: Cursor<PageRecord> = Cursor::new("Foo");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Foo");
        assert_eq!(format!("{:?}", a), "Cursor(\"Foo\")");
    }

    #[test]
    fn page_has_more_follows_cursor() {
        let page: Page<PageRecord> = Page {
            items: Vec::new(),
            cursor: None,
        };
        assert!(!page.has_more());
    }
}
