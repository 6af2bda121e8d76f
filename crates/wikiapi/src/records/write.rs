//! Results of write operations.

use serde::{Deserialize, Serialize};

/// The outcome of a write that did not fail outright.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteOutcome<T> {
    /// The server applied the write.
    Applied(T),
    /// The run page did not allow the write; nothing was submitted.
    Denied,
}

impl<T> WriteOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied(_))
    }

    /// The result of an applied write.
    pub fn applied(self) -> Option<T> {
        match self {
            WriteOutcome::Applied(result) => Some(result),
            WriteOutcome::Denied => None,
        }
    }
}

/// Result of `action=edit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditResult {
    pub result: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub oldrevid: Option<u64>,
    #[serde(default)]
    pub newrevid: Option<u64>,
    /// The submitted text matched the current revision.
    #[serde(default)]
    pub nochange: bool,
}

/// Result of `action=move`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub talkfrom: Option<String>,
    #[serde(default)]
    pub talkto: Option<String>,
}

/// Result of `action=rollback`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollbackResult {
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub summary: Option<String>,
    /// The revision created by the rollback; zero if none was.
    #[serde(default)]
    pub revid: u64,
    #[serde(default)]
    pub old_revid: u64,
    #[serde(default)]
    pub last_revid: u64,
}

impl RollbackResult {
    /// Whether the rollback produced a new revision.
    pub fn is_effective(&self) -> bool {
        self.revid != 0 && self.summary.is_some()
    }
}
