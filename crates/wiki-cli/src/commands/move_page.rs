//! Move command implementation.

use anyhow::{Context, Result};
use clap::Args;

use wikiapi::Title;

use crate::cli::GlobalArgs;
use crate::config;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Current title
    pub from: String,

    /// New title
    pub to: String,

    /// Reason for the move
    #[arg(long, default_value = "")]
    pub reason: String,
}

pub async fn run(args: MoveArgs, global: &GlobalArgs) -> Result<()> {
    let from = Title::new(&args.from).context("Invalid source title")?;
    let to = Title::new(&args.to).context("Invalid target title")?;

    let mut client = config::connect_user(global).await?;
    let outcome = client
        .move_page(&from, &to, &args.reason)
        .await
        .context("Failed to move page")?;

    super::report_write(outcome, "Page moved")
}
