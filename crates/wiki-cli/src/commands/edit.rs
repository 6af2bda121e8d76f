//! Edit command implementation.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use wikiapi::{EditRequest, Title};

use crate::cli::GlobalArgs;
use crate::config;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Page title
    pub title: String,

    /// New page text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    /// File with the new page text (use - for stdin)
    #[arg(long)]
    pub file: Option<String>,

    /// Edit summary
    #[arg(long, short = 'm', default_value = "")]
    pub summary: String,

    /// Mark the edit as minor
    #[arg(long)]
    pub minor: bool,

    /// Do not flag the edit as a bot edit
    #[arg(long)]
    pub no_bot: bool,
}

pub async fn run(args: EditArgs, global: &GlobalArgs) -> Result<()> {
    let title = Title::new(&args.title).context("Invalid title")?;

    let text = match (args.text, args.file.as_deref()) {
        (Some(text), _) => text,
        (None, Some("-")) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path).context("Failed to read text file")?,
        (None, None) => String::new(),
    };

    let request = EditRequest::new(title, text)
        .summary(args.summary)
        .minor(args.minor)
        .bot(!args.no_bot);

    let mut client = config::connect_user(global).await?;
    let outcome = client.edit(&request).await.context("Failed to edit")?;

    super::report_write(outcome, "Edit saved")
}
