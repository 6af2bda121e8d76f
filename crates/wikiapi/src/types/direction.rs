//! Enumeration order parameters.

use std::fmt;

/// Time-ordered enumeration direction (`older` or `newer`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Newest first.
    #[default]
    Older,
    /// Oldest first.
    Newer,
}

impl Direction {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Older => "older",
            Direction::Newer => "newer",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alphabetical enumeration order (`ascending` or `descending`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of a page a search matches against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchWhat {
    #[default]
    Text,
    Title,
}

impl SearchWhat {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchWhat::Text => "text",
            SearchWhat::Title => "title",
        }
    }
}

/// Redirect filter for backlink enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RedirectFilter {
    #[default]
    All,
    Redirects,
    NonRedirects,
}

impl RedirectFilter {
    /// The wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectFilter::All => "all",
            RedirectFilter::Redirects => "redirects",
            RedirectFilter::NonRedirects => "nonredirects",
        }
    }
}
