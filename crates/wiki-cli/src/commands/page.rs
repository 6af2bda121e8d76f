//! Page command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use wikiapi::Title;

use crate::cli::GlobalArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page title
    pub title: String,

    /// Print the page id instead of the text
    #[arg(long)]
    pub id: bool,
}

pub async fn run(args: PageArgs, global: &GlobalArgs) -> Result<()> {
    let title = Title::new(&args.title).context("Invalid title")?;
    let client = config::connect(global).await?;

    if args.id {
        match client.page_id(&title).await.context("Failed to fetch page")? {
            Some(id) => output::field("Page id", id),
            None => bail!("No such page: {title}"),
        }
        return Ok(());
    }

    match client.page_text(&title).await.context("Failed to fetch page")? {
        Some(text) => println!("{text}"),
        None => bail!("No such page: {title}"),
    }

    Ok(())
}
