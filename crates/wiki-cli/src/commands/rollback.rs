//! Rollback command implementation.

use anyhow::{Context, Result};
use clap::Args;

use wikiapi::Title;

use crate::cli::GlobalArgs;
use crate::config;

#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Page title
    pub title: String,

    /// User whose latest consecutive edits are reverted
    pub user: String,

    /// Edit summary for the rollback
    #[arg(long, short = 'm', default_value = "")]
    pub summary: String,
}

pub async fn run(args: RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let title = Title::new(&args.title).context("Invalid title")?;

    let mut client = config::connect_user(global).await?;
    let outcome = client
        .rollback(&title, &args.user, &args.summary)
        .await
        .context("Failed to roll back")?;

    super::report_write(outcome, "Rolled back")
}
