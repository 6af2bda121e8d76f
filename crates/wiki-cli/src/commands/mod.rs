//! Subcommand implementations.

mod configure;
mod edit;
mod list;
mod move_page;
mod page;
mod revisions;
mod rollback;
mod whoami;

use anyhow::{Result, bail};
use clap::Subcommand;
use serde::Serialize;

use wikiapi::WriteOutcome;

use crate::cli::GlobalArgs;
use crate::output;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save connection defaults
    Configure(configure::ConfigureArgs),

    /// Show the identity the wiki sees
    Whoami(whoami::WhoamiArgs),

    /// Print the current text of a page
    Page(page::PageArgs),

    /// List revisions of a page
    Revisions(revisions::RevisionsArgs),

    /// Enumerate a list module
    List(list::ListCommand),

    /// Replace the text of a page
    Edit(edit::EditArgs),

    /// Move a page to a new title
    Move(move_page::MoveArgs),

    /// Revert a user's latest edits to a page
    Rollback(rollback::RollbackArgs),
}

pub async fn handle(command: Command, global: &GlobalArgs) -> Result<()> {
    match command {
        Command::Configure(args) => configure::run(args, global),
        Command::Whoami(args) => whoami::run(args, global).await,
        Command::Page(args) => page::run(args, global).await,
        Command::Revisions(args) => revisions::run(args, global).await,
        Command::List(cmd) => list::handle(cmd, global).await,
        Command::Edit(args) => edit::run(args, global).await,
        Command::Move(args) => move_page::run(args, global).await,
        Command::Rollback(args) => rollback::run(args, global).await,
    }
}

/// Print an applied write, or fail if the run page denied it.
fn report_write<T: Serialize>(outcome: WriteOutcome<T>, done: &str) -> Result<()> {
    match outcome {
        WriteOutcome::Applied(result) => {
            output::success(done);
            output::record(&result, false)
        }
        WriteOutcome::Denied => {
            bail!("Write denied: the run page does not enable writes for this user")
        }
    }
}
