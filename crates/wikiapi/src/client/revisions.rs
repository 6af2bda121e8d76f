//! Revision reads with a bounded wait for read-after-write lag.

use tokio::time::sleep;
use tracing::{debug, instrument};

use crate::Result;
use crate::codec::Params;
use crate::error::NotFoundError;
use crate::records::{Cursor, PageRevisions, RawPage, RevisionRecord};
use crate::transport::Transport;
use crate::types::{Direction, Title};

use super::ApiClient;

/// Extra lookups allowed when a requested revision has not appeared yet.
const REVISION_WAIT_RETRIES: usize = 1;

/// Parameters for [`ApiClient::revisions`].
///
/// By default this asks for the latest revision's metadata, waits once for a
/// requested revision id to appear, and fails when the page or revision is
/// missing.
///
/// ```
/// use wikiapi::{Direction, RevisionQuery, Title};
///
/// let query = RevisionQuery::new(Title::new("Sandbox").unwrap())
///     .limit(10)
///     .direction(Direction::Newer)
///     .fail_on_missing(false);
/// assert_eq!(query.title().as_str(), "Sandbox");
/// ```
#[derive(Clone, Debug)]
pub struct RevisionQuery {
    title: Title,
    limit: u32,
    direction: Direction,
    content: bool,
    start_id: Option<u64>,
    cursor: Option<Cursor<RevisionRecord>>,
    wait: bool,
    fail_on_missing: bool,
    follow_redirects: bool,
}

impl RevisionQuery {
    pub fn new(title: Title) -> Self {
        Self {
            title,
            limit: 1,
            direction: Direction::Older,
            content: false,
            start_id: None,
            cursor: None,
            wait: true,
            fail_on_missing: true,
            follow_redirects: false,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Include the main-slot wikitext of each revision.
    pub fn content(mut self, content: bool) -> Self {
        self.content = content;
        self
    }

    /// Start enumerating at this revision, which must then be among the
    /// results.
    pub fn start_id(mut self, revid: u64) -> Self {
        self.start_id = Some(revid);
        self
    }

    pub fn cursor(mut self, cursor: Cursor<RevisionRecord>) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Wait and look again once if the start revision is not visible yet.
    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Report a missing page or revision as an error rather than `None`.
    pub fn fail_on_missing(mut self, fail: bool) -> Self {
        self.fail_on_missing = fail;
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    fn props(&self) -> Vec<&'static str> {
        let mut props = vec!["timestamp", "ids", "user", "comment", "flags"];
        if self.content {
            props.push("content");
        }
        props
    }
}

impl<T: Transport> ApiClient<T> {
    /// Fetch revisions of a page.
    ///
    /// When the query names a start revision that is not among the results,
    /// the lookup is repeated once after
    /// [`ClientConfig::revision_wait`](crate::ClientConfig::revision_wait)
    /// (if waiting is enabled). A page or revision that is still missing is
    /// reported as [`NotFoundError`], or as `Ok(None)` when the query does
    /// not fail on missing.
    #[instrument(skip(self, query), fields(title = %query.title, start_id = query.start_id))]
    pub async fn revisions(&self, query: &RevisionQuery) -> Result<Option<PageRevisions>> {
        let params = self
            .query()
            .set("prop", "revisions")
            .set("titles", &query.title)
            .set("rvslots", "main")
            .set("rvlimit", query.limit)
            .multi("rvprop", query.props())
            .set("rvdir", query.direction)
            .opt("rvstartid", query.start_id)
            .opt("rvcontinue", query.cursor.as_ref())
            .set("meta", "userinfo")
            .flag("redirects", query.follow_redirects);

        let mut retries_left = if query.wait { REVISION_WAIT_RETRIES } else { 0 };
        loop {
            let Some(page) = self.fetch_revisions(&params).await? else {
                return missing(
                    query,
                    NotFoundError::Page {
                        title: query.title.to_string(),
                    },
                );
            };

            let Some(revid) = query.start_id else {
                return Ok(Some(page));
            };
            if page.contains(revid) {
                return Ok(Some(page));
            }
            if retries_left == 0 {
                return missing(
                    query,
                    NotFoundError::Revision {
                        title: query.title.to_string(),
                        revid,
                    },
                );
            }

            retries_left -= 1;
            debug!(revid, wait = ?self.config.revision_wait, "Revision not visible yet");
            sleep(self.config.revision_wait).await;
        }
    }

    async fn fetch_revisions(&self, params: &Params) -> Result<Option<PageRevisions>> {
        let response = self.get(params).await?;

        let pages: Vec<RawPage> = response.extract_list(&["query", "pages"])?;
        let Some(page) = pages.into_iter().next().filter(RawPage::has_revisions) else {
            return Ok(None);
        };

        let current_user = response
            .get(&["query", "userinfo", "name"])
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let cursor = response
            .continuation("revisions", "rvcontinue")
            .map(Cursor::new);

        Ok(Some(page.into_revisions(current_user, cursor)))
    }
}

fn missing(query: &RevisionQuery, err: NotFoundError) -> Result<Option<PageRevisions>> {
    if query.fail_on_missing {
        Err(err.into())
    } else {
        debug!(error = %err, "Not found");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedTransport;
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::Error;
    use crate::types::ApiUrl;
    use std::time::Duration;

    fn client(replies: &[&str]) -> ApiClient<ScriptedTransport> {
        let config = ClientConfig::new(ApiUrl::new("https://wiki.example.org/w/api.php").unwrap())
            .revision_wait(Duration::from_millis(5));
        ApiClient::with_transport(config, ScriptedTransport::new(replies.iter().copied()))
    }

    const REV_9: &str = r#"{"query":{"pages":[{"pageid":1,"ns":0,"title":"Sandbox","revisions":[
        {"revid":9,"parentid":8,"user":"Example","timestamp":"2024-01-01T00:00:00Z","comment":"c"}]}],
        "userinfo":{"id":7,"name":"Example"}}}"#;

    #[tokio::test]
    async fn request_carries_revision_props() {
        let query = RevisionQuery::new(Title::new("Sandbox").unwrap()).content(true);
        let client = client(&[REV_9]);
        let page = client.revisions(&query).await.unwrap().unwrap();
        assert_eq!(page.current_user.as_deref(), Some("Example"));

        let url = &client.transport().sent()[0].url;
        assert!(url.contains("prop=revisions"));
        assert!(url.contains("rvprop=timestamp%7Cids%7Cuser%7Ccomment%7Cflags%7Ccontent"));
        assert!(url.contains("rvdir=older"));
        assert!(!url.contains("rvstartid"));
    }

    #[tokio::test]
    async fn found_revision_needs_no_wait() {
        let query = RevisionQuery::new(Title::new("Sandbox").unwrap()).start_id(9);
        let client = client(&[REV_9]);
        let page = client.revisions(&query).await.unwrap().unwrap();
        assert!(page.contains(9));
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn absent_revision_is_looked_up_twice() {
        let query = RevisionQuery::new(Title::new("Sandbox").unwrap()).start_id(10);
        let client = client(&[REV_9, REV_9]);
        let err = client.revisions(&query).await.unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound(NotFoundError::Revision { revid: 10, .. })
        ));
        assert_eq!(client.transport().sent().len(), 2);
    }

    #[tokio::test]
    async fn no_wait_means_one_lookup() {
        let query = RevisionQuery::new(Title::new("Sandbox").unwrap())
            .start_id(10)
            .wait(false)
            .fail_on_missing(false);
        let client = client(&[REV_9]);
        assert!(client.revisions(&query).await.unwrap().is_none());
        assert_eq!(client.transport().sent().len(), 1);
    }

    #[tokio::test]
    async fn missing_page_does_not_wait() {
        let query = RevisionQuery::new(Title::new("Nowhere").unwrap()).start_id(10);
        let client = client(&[r#"{"query":{"pages":[{"ns":0,"title":"Nowhere","missing":true}]}}"#]);
        let err = client.revisions(&query).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(NotFoundError::Page { .. })));
        assert_eq!(client.transport().sent().len(), 1);
    }
}
