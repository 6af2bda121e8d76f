//! List command implementations.
//!
//! Every list prints one JSON line per record. Without `--all` the command
//! prints one page and the cursor to continue from; with `--all` it keeps
//! following cursors until the enumeration ends.

use std::future::Future;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use wikiapi::{
    Cursor, Direction, LogFilter, Page, RedirectFilter, SearchOptions, SearchWhat, SortOrder, Title,
};

use crate::cli::GlobalArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(flatten)]
    pub paging: PagingArgs,

    #[command(subcommand)]
    pub list: ListSubcommand,
}

/// Options shared by every list.
#[derive(Args, Debug)]
pub struct PagingArgs {
    /// Maximum number of records per request
    #[arg(long, default_value_t = 10, global = true)]
    pub limit: u32,

    /// Pagination cursor from an earlier run
    #[arg(long, global = true)]
    pub cursor: Option<String>,

    /// Follow cursors until the enumeration ends
    #[arg(long, global = true)]
    pub all: bool,

    /// Enumerate oldest first, or in descending order for sorted lists
    #[arg(long, global = true)]
    pub reverse: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

impl PagingArgs {
    fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Newer
        } else {
            Direction::Older
        }
    }

    fn order(&self) -> SortOrder {
        if self.reverse {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ListSubcommand {
    /// Recent changes
    Recent {
        #[arg(long)]
        namespace: Option<i32>,
        /// Timestamp to start from (RFC 3339)
        #[arg(long)]
        start: Option<DateTime<Utc>>,
    },

    /// Search page text or titles
    Search {
        query: String,
        #[arg(long)]
        namespace: Option<i32>,
        /// Match titles rather than text
        #[arg(long)]
        titles: bool,
        /// Include redirects
        #[arg(long)]
        redirects: bool,
    },

    /// Log events
    Logs {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Log type, e.g. delete or block
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
    },

    /// Contributions of one user
    Contribs { user: String },

    /// Registered users
    Users {
        /// Only users in this group
        #[arg(long)]
        group: Option<String>,
    },

    /// Pages in a category
    Members { category: String },

    /// All categories
    Categories {
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Pages linking to a page
    Backlinks {
        title: String,
        #[arg(long, value_enum, default_value_t = Redirects::All)]
        redirects: Redirects,
    },

    /// Pages transcluding a page
    Embedded { title: String },

    /// Pages whose titles start with a prefix
    Prefix {
        prefix: String,
        #[arg(long, default_value_t = 0)]
        namespace: i32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Redirects {
    All,
    Only,
    Exclude,
}

impl From<Redirects> for RedirectFilter {
    fn from(redirects: Redirects) -> Self {
        match redirects {
            Redirects::All => RedirectFilter::All,
            Redirects::Only => RedirectFilter::Redirects,
            Redirects::Exclude => RedirectFilter::NonRedirects,
        }
    }
}

pub async fn handle(cmd: ListCommand, global: &GlobalArgs) -> Result<()> {
    let client = config::connect(global).await?;
    let client = &client;
    let paging = &cmd.paging;
    let limit = paging.limit;
    let direction = paging.direction();
    let order = paging.order();

    match cmd.list {
        ListSubcommand::Recent { namespace, start } => {
            print_pages(paging, |cursor| async move {
                client
                    .recent_changes(limit, direction, namespace, start, cursor.as_ref())
                    .await
            })
            .await
        }
        ListSubcommand::Search {
            query,
            namespace,
            titles,
            redirects,
        } => {
            let query = &query;
            let options = &SearchOptions {
                namespace,
                what: titles.then_some(SearchWhat::Title),
                redirects,
            };
            print_pages(paging, |cursor| async move {
                client.search(query, limit, options, cursor.as_ref()).await
            })
            .await
        }
        ListSubcommand::Logs {
            user,
            title,
            kind,
            start,
            end,
        } => {
            let title = title
                .map(Title::new)
                .transpose()
                .context("Invalid title")?;
            let filter = &LogFilter {
                user,
                title,
                kind,
                start,
                end,
            };
            print_pages(paging, |cursor| async move {
                client.logs(limit, direction, filter, cursor.as_ref()).await
            })
            .await
        }
        ListSubcommand::Contribs { user } => {
            let user = &user;
            print_pages(paging, |cursor| async move {
                client
                    .user_contribs(user, limit, direction, cursor.as_ref())
                    .await
            })
            .await
        }
        ListSubcommand::Users { group } => {
            let group = group.as_deref();
            print_pages(paging, |cursor| async move {
                client.users(limit, order, group, cursor.as_ref()).await
            })
            .await
        }
        ListSubcommand::Members { category } => {
            let category = &category;
            print_pages(paging, |cursor| async move {
                client
                    .category_members(category, limit, order, cursor.as_ref())
                    .await
            })
            .await
        }
        ListSubcommand::Categories { prefix } => {
            let prefix = prefix.as_deref();
            print_pages(paging, |cursor| async move {
                client.categories(limit, order, prefix, cursor.as_ref()).await
            })
            .await
        }
        ListSubcommand::Backlinks { title, redirects } => {
            let title = &Title::new(&title).context("Invalid title")?;
            let filter = redirects.into();
            print_pages(paging, |cursor| async move {
                client
                    .backlinks(title, limit, order, filter, cursor.as_ref())
                    .await
            })
            .await
        }
        ListSubcommand::Embedded { title } => {
            let title = &Title::new(&title).context("Invalid title")?;
            print_pages(paging, |cursor| async move {
                client.embedded_in(title, limit, order, cursor.as_ref()).await
            })
            .await
        }
        ListSubcommand::Prefix { prefix, namespace } => {
            let prefix = &prefix;
            print_pages(paging, |cursor| async move {
                client
                    .prefix_pages(prefix, namespace, limit, order, cursor.as_ref())
                    .await
            })
            .await
        }
    }
}

/// Fetch and print pages, following cursors when `--all` is set.
async fn print_pages<T, F, Fut>(paging: &PagingArgs, mut fetch: F) -> Result<()>
where
    T: Serialize,
    F: FnMut(Option<Cursor<T>>) -> Fut,
    Fut: Future<Output = wikiapi::Result<Page<T>>>,
{
    let mut cursor = paging.cursor.clone().map(Cursor::new);
    let mut printed = 0usize;

    loop {
        let page = fetch(cursor.take()).await.context("Failed to list")?;

        for item in &page.items {
            output::record(item, paging.pretty)?;
        }
        printed += page.items.len();

        match page.cursor {
            Some(next) if paging.all => cursor = Some(next),
            Some(next) => {
                output::next_cursor(next);
                break;
            }
            None => break,
        }
    }

    if printed == 0 {
        eprintln!("{}", "No records found.".dimmed());
    }

    Ok(())
}
