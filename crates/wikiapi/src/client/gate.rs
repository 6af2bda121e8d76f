//! The run-page check that guards every write.

use tracing::{debug, instrument, warn};

use crate::transport::Transport;
use crate::types::Title;

use super::ApiClient;
use super::revisions::RevisionQuery;

/// Subpage of the logged-in user's page that enables writes.
pub const RUN_PAGE: &str = "Run";

const ENABLING_WORDS: [&str; 3] = ["yes", "enable", "true"];

impl<T: Transport> ApiClient<T> {
    /// Whether writes are currently enabled for the logged-in user.
    ///
    /// Reads the latest revision of `User:<name>/Run` and allows writes only
    /// if its text contains `yes`, `enable` or `true` in any case. Any
    /// failure to read the page, including an anonymous session, a missing
    /// page or a page without revisions, answers `false`.
    #[instrument(skip(self), fields(user = self.session.user()))]
    pub async fn allowed_to_run(&self) -> bool {
        let Some(user) = self.session.user() else {
            debug!("Anonymous session, writes disabled");
            return false;
        };

        let title = match Title::user_subpage(user, RUN_PAGE) {
            Ok(title) => title,
            Err(err) => {
                warn!(error = %err, "Cannot name run page");
                return false;
            }
        };

        let query = RevisionQuery::new(title)
            .content(true)
            .fail_on_missing(false);

        match self.revisions(&query).await {
            Ok(Some(page)) => {
                let enabled = page
                    .first()
                    .and_then(|rev| rev.content.as_deref())
                    .is_some_and(enables_writes);
                debug!(enabled, "Read run page");
                enabled
            }
            Ok(None) => {
                debug!("Run page missing");
                false
            }
            Err(err) => {
                warn!(error = %err, "Run page check failed");
                false
            }
        }
    }
}

fn enables_writes(content: &str) -> bool {
    let content = content.to_lowercase();
    ENABLING_WORDS.iter().any(|word| content.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabling_words_match_case_insensitively() {
        assert!(enables_writes("yes"));
        assert!(enables_writes("ENABLE"));
        assert!(enables_writes("Bot enabled: True"));
        assert!(!enables_writes("no"));
        assert!(!enables_writes(""));
        assert!(!enables_writes("disabled"));
    }
}
