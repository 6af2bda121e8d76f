//! Paginated `list=` reads.
//!
//! Every operation returns one [`Page`]; pass its cursor back to the same
//! operation to continue. The client never loops on its own.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::Result;
use crate::codec::Params;
use crate::records::{
    Backlink, CategoryInfo, CategoryMember, Cursor, ListItem, LogEntry, Page, PageRecord,
    RecentChange, SearchHit, Transclusion, UserContrib, UserRecord,
};
use crate::transport::Transport;
use crate::types::{Direction, RedirectFilter, SearchWhat, SortOrder, Title};

use super::ApiClient;

/// Optional filters for [`ApiClient::search`].
#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    /// Restrict to one namespace.
    pub namespace: Option<i32>,
    /// Search page text or titles; the server default when unset.
    pub what: Option<SearchWhat>,
    /// Include redirects in the results.
    pub redirects: bool,
}

/// Optional filters for [`ApiClient::logs`].
#[derive(Clone, Debug, Default)]
pub struct LogFilter {
    pub user: Option<String>,
    pub title: Option<Title>,
    /// Log type, e.g. `delete` or `block`.
    pub kind: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

fn api_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl<T: Transport> ApiClient<T> {
    /// Fetch one page of `I` records, continuing from `cursor`.
    async fn list<I: ListItem>(
        &self,
        params: Params,
        limit: u32,
        cursor: Option<&Cursor<I>>,
    ) -> Result<Page<I>> {
        let params = params
            .set("list", I::MODULE)
            .set(I::LIMIT_PARAM, limit)
            .opt(I::CONTINUE_PARAM, cursor);

        let response = self.get(&params).await?;
        let items = response.extract_list(&["query", I::MODULE])?;
        let cursor = response
            .continuation(I::MODULE, I::CONTINUE_PARAM)
            .map(Cursor::new);

        Ok(Page { items, cursor })
    }

    /// Recent changes across the wiki.
    ///
    /// `start` is the timestamp to enumerate from, in `direction`.
    pub async fn recent_changes(
        &self,
        limit: u32,
        direction: Direction,
        namespace: Option<i32>,
        start: Option<DateTime<Utc>>,
        cursor: Option<&Cursor<RecentChange>>,
    ) -> Result<Page<RecentChange>> {
        let params = self
            .query()
            .set("rcdir", direction)
            .multi(
                "rcprop",
                ["user", "comment", "flags", "timestamp", "title", "ids", "sizes"],
            )
            .opt("rcnamespace", namespace)
            .opt("rcstart", start.map(api_timestamp));
        self.list(params, limit, cursor).await
    }

    /// Full-text or title search.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        options: &SearchOptions,
        cursor: Option<&Cursor<SearchHit>>,
    ) -> Result<Page<SearchHit>> {
        let params = self
            .query()
            .set("srsearch", query)
            .opt("srnamespace", options.namespace)
            .opt("srwhat", options.what.map(|w| w.as_str()))
            .flag("srredirects", options.redirects);
        self.list(params, limit, cursor).await
    }

    /// Log events, optionally filtered.
    pub async fn logs(
        &self,
        limit: u32,
        direction: Direction,
        filter: &LogFilter,
        cursor: Option<&Cursor<LogEntry>>,
    ) -> Result<Page<LogEntry>> {
        let params = self
            .query()
            .set("ledir", direction)
            .opt("leuser", filter.user.as_deref())
            .opt("letitle", filter.title.as_ref())
            .opt("letype", filter.kind.as_deref())
            .opt("lestart", filter.start.map(api_timestamp))
            .opt("leend", filter.end.map(api_timestamp));
        self.list(params, limit, cursor).await
    }

    /// Edits made by one user.
    pub async fn user_contribs(
        &self,
        user: &str,
        limit: u32,
        direction: Direction,
        cursor: Option<&Cursor<UserContrib>>,
    ) -> Result<Page<UserContrib>> {
        let params = self
            .query()
            .set("ucuser", user)
            .set("ucdir", direction)
            .multi(
                "ucprop",
                ["ids", "title", "timestamp", "comment", "size", "flags"],
            );
        self.list(params, limit, cursor).await
    }

    /// Registered accounts in name order.
    ///
    /// The cursor is a username: `Cursor::new("Name")` starts the
    /// enumeration at that user.
    pub async fn users(
        &self,
        limit: u32,
        order: SortOrder,
        group: Option<&str>,
        cursor: Option<&Cursor<UserRecord>>,
    ) -> Result<Page<UserRecord>> {
        let params = self
            .query()
            .set("audir", order)
            .opt("augroup", group)
            .multi(
                "auprop",
                ["blockinfo", "groups", "editcount", "registration"],
            );
        self.list(params, limit, cursor).await
    }

    /// Pages in a category. `category` may omit the `Category:` prefix.
    pub async fn category_members(
        &self,
        category: &str,
        limit: u32,
        order: SortOrder,
        cursor: Option<&Cursor<CategoryMember>>,
    ) -> Result<Page<CategoryMember>> {
        let title = Title::category(category)?;
        let params = self
            .query()
            .set("cmtitle", &title)
            .set("cmdir", order);
        self.list(params, limit, cursor).await
    }

    /// All categories, optionally those starting with `prefix`.
    pub async fn categories(
        &self,
        limit: u32,
        order: SortOrder,
        prefix: Option<&str>,
        cursor: Option<&Cursor<CategoryInfo>>,
    ) -> Result<Page<CategoryInfo>> {
        let params = self
            .query()
            .set("acdir", order)
            .opt("acprefix", prefix)
            .set("acprop", "size");
        self.list(params, limit, cursor).await
    }

    /// Pages linking to `title`.
    pub async fn backlinks(
        &self,
        title: &Title,
        limit: u32,
        order: SortOrder,
        filter: RedirectFilter,
        cursor: Option<&Cursor<Backlink>>,
    ) -> Result<Page<Backlink>> {
        let params = self
            .query()
            .set("bltitle", title)
            .set("bldir", order)
            .set("blfilterredir", filter.as_str());
        self.list(params, limit, cursor).await
    }

    /// Pages transcluding `title`.
    pub async fn embedded_in(
        &self,
        title: &Title,
        limit: u32,
        order: SortOrder,
        cursor: Option<&Cursor<Transclusion>>,
    ) -> Result<Page<Transclusion>> {
        let params = self
            .query()
            .set("eititle", title)
            .set("eidir", order);
        self.list(params, limit, cursor).await
    }

    /// Pages whose titles start with `prefix` within one namespace.
    pub async fn prefix_pages(
        &self,
        prefix: &str,
        namespace: i32,
        limit: u32,
        order: SortOrder,
        cursor: Option<&Cursor<PageRecord>>,
    ) -> Result<Page<PageRecord>> {
        let params = self
            .query()
            .set("apprefix", prefix)
            .set("apnamespace", namespace)
            .set("apdir", order);
        self.list(params, limit, cursor).await
    }
}
