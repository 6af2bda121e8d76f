//! Revision records from `prop=revisions`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cursor;

/// One revision of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevisionRecord {
    pub revid: u64,
    pub parentid: u64,
    /// Absent when the username has been suppressed.
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub comment: Option<String>,
    pub minor: bool,
    /// Main-slot wikitext, when content was requested.
    pub content: Option<String>,
    pub page_id: u64,
    pub namespace: i32,
    pub title: String,
}

/// Revisions of a single page, with page-level metadata.
#[derive(Clone, Debug)]
pub struct PageRevisions {
    pub page_id: u64,
    pub namespace: i32,
    pub title: String,
    /// The identity the server saw for the request.
    pub current_user: Option<String>,
    pub revisions: Vec<RevisionRecord>,
    /// Continues the enumeration from the next revision.
    pub cursor: Option<Cursor<RevisionRecord>>,
}

impl PageRevisions {
    /// Whether the revision is among those returned.
    pub fn contains(&self, revid: u64) -> bool {
        self.revisions.iter().any(|rev| rev.revid == revid)
    }

    /// The first revision returned (the latest, when enumerating `older`).
    pub fn first(&self) -> Option<&RevisionRecord> {
        self.revisions.first()
    }
}

/// A page entry under `query.pages`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub ns: i32,
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub revisions: Option<Vec<RawRevision>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRevision {
    pub revid: u64,
    #[serde(default)]
    pub parentid: u64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub slots: Option<RawSlots>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSlots {
    pub main: Option<RawSlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSlot {
    #[serde(default)]
    pub content: Option<String>,
}

impl RawPage {
    /// Whether the page exists and has at least one revision.
    pub fn has_revisions(&self) -> bool {
        !self.missing
            && !self.invalid
            && self.pageid.is_some()
            && self.revisions.as_ref().is_some_and(|revs| !revs.is_empty())
    }

    /// Convert into the public shape. Only call when `has_revisions` holds.
    pub fn into_revisions(
        self,
        current_user: Option<String>,
        cursor: Option<Cursor<RevisionRecord>>,
    ) -> PageRevisions {
        let page_id = self.pageid.unwrap_or_default();
        let revisions = self
            .revisions
            .unwrap_or_default()
            .into_iter()
            .map(|rev| RevisionRecord {
                revid: rev.revid,
                parentid: rev.parentid,
                user: rev.user,
                timestamp: rev.timestamp,
                comment: rev.comment,
                minor: rev.minor,
                content: rev.slots.and_then(|s| s.main).and_then(|m| m.content),
                page_id,
                namespace: self.ns,
                title: self.title.clone(),
            })
            .collect();

        PageRevisions {
            page_id,
            namespace: self.ns,
            title: self.title,
            current_user,
            revisions,
            cursor,
        }
    }
}
