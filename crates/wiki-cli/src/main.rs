//! wiki - CLI tool for MediaWiki Action API exploration.
//!
//! This is a thin wrapper over the `wikiapi` library, intended for manual
//! exploration of a wiki's Action API and for one-off bot maintenance.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    commands::handle(cli.command, &cli.global).await
}

/// Default filter for a `-v` count; `RUST_LOG` overrides it.
fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,wikiapi=info,wiki=info",
        2 => "info,wikiapi=debug,wiki=debug",
        _ => "debug,wikiapi=trace,wiki=trace",
    }
}

// stdout carries command output, so every log line goes to stderr.
fn init_logging(verbosity: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
