//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Command;

/// MediaWiki Action API CLI tool.
#[derive(Parser, Debug)]
#[command(name = "wiki")]
#[command(author, version = env!("WIKI_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings; each falls back to the saved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Action API endpoint, e.g. https://en.wikipedia.org/w/api.php
    #[arg(long, env = "WIKI_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Username to log in as; the password is read from WIKI_PASSWORD
    #[arg(long, env = "WIKI_USER", global = true)]
    pub user: Option<String>,
}
