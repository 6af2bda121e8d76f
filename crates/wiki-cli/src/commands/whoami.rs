//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use wikiapi::Title;
use wikiapi::client::RUN_PAGE;

use crate::cli::GlobalArgs;
use crate::config;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Also report whether the run page enables writes
    #[arg(long)]
    pub check_run: bool,
}

pub async fn run(args: WhoamiArgs, global: &GlobalArgs) -> Result<()> {
    let client = config::connect(global).await?;

    let info = client
        .user_info()
        .await
        .context("Failed to fetch user info")?;

    output::field("API", client.endpoint());
    output::field("Name", &info.name);
    output::field("Anonymous", info.anon);
    output::field(
        "Logged in",
        client.logged_in().await.context("Failed to check login")?,
    );

    if args.check_run {
        let enabled = client.allowed_to_run().await;
        output::field("Writes enabled", enabled);
        if let Some(user) = client.session().user().filter(|_| !enabled) {
            let run_page = Title::user_subpage(user, RUN_PAGE).context("Invalid run page title")?;
            output::warning(&format!("{run_page} does not enable writes"));
        }
    }

    Ok(())
}
