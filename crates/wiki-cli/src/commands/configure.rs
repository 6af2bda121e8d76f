//! Configure command implementation.

use anyhow::{Context, Result};
use clap::Args;

use wikiapi::ApiUrl;

use crate::cli::GlobalArgs;
use crate::config::storage::{self, StoredConfig};
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// User-Agent to send; wikis ask bots to include contact details
    #[arg(long)]
    pub user_agent: Option<String>,
}

pub fn run(args: ConfigureArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = storage::load_config()?;

    if let Some(api_url) = &global.api_url {
        let api_url = ApiUrl::new(api_url).context("Invalid API URL")?;
        config.api_url = Some(api_url.to_string());
    }
    if let Some(user) = &global.user {
        config.user = Some(user.clone());
    }
    if let Some(user_agent) = args.user_agent {
        config.user_agent = Some(user_agent);
    }

    let path = storage::save_config(&config).context("Failed to save config")?;

    output::success("Configuration saved");
    show(&config);
    output::field("File", path.display());

    Ok(())
}

fn show(config: &StoredConfig) {
    output::field("API URL", config.api_url.as_deref().unwrap_or("-"));
    output::field("User", config.user.as_deref().unwrap_or("-"));
    output::field("User-Agent", config.user_agent.as_deref().unwrap_or("-"));
}
