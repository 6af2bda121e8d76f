//! Revisions command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use wikiapi::{Cursor, Direction, RevisionQuery, Title};

use crate::cli::GlobalArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct RevisionsArgs {
    /// Page title
    pub title: String,

    /// Maximum number of revisions to return
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Enumerate oldest first
    #[arg(long)]
    pub newer: bool,

    /// Start at this revision id, which must exist
    #[arg(long)]
    pub start_id: Option<u64>,

    /// Include revision text
    #[arg(long)]
    pub content: bool,

    /// Pagination cursor
    #[arg(long)]
    pub cursor: Option<String>,

    /// Do not wait for a start revision that is not visible yet
    #[arg(long)]
    pub no_wait: bool,

    /// Resolve redirects
    #[arg(long)]
    pub follow_redirects: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: RevisionsArgs, global: &GlobalArgs) -> Result<()> {
    let title = Title::new(&args.title).context("Invalid title")?;
    let client = config::connect(global).await?;

    let direction = if args.newer {
        Direction::Newer
    } else {
        Direction::Older
    };
    let mut query = RevisionQuery::new(title)
        .limit(args.limit)
        .direction(direction)
        .content(args.content)
        .wait(!args.no_wait)
        .follow_redirects(args.follow_redirects)
        .fail_on_missing(false);
    if let Some(revid) = args.start_id {
        query = query.start_id(revid);
    }
    if let Some(cursor) = args.cursor {
        query = query.cursor(Cursor::new(cursor));
    }

    let Some(page) = client
        .revisions(&query)
        .await
        .context("Failed to fetch revisions")?
    else {
        eprintln!("{}", "No matching revisions.".dimmed());
        return Ok(());
    };

    for revision in &page.revisions {
        output::record(revision, args.pretty)?;
    }

    if let Some(cursor) = &page.cursor {
        output::next_cursor(cursor);
    }

    Ok(())
}
