//! Connection settings and client construction.
//!
//! Flags and environment variables override the saved configuration.

pub mod storage;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use wikiapi::{ApiClient, ApiUrl, ClientConfig, Credentials};

use crate::cli::GlobalArgs;

/// Environment variable holding the login password.
pub const PASSWORD_ENV: &str = "WIKI_PASSWORD";

/// Settings resolved from flags, environment and the config file.
#[derive(Debug)]
pub struct Settings {
    pub api_url: ApiUrl,
    pub user: Option<String>,
    pub user_agent: Option<String>,
}

impl Settings {
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let stored = storage::load_config()?;

        let Some(api_url) = global.api_url.clone().or(stored.api_url) else {
            bail!("No API URL. Pass --api-url, set WIKI_API_URL or run 'wiki configure'.");
        };
        let api_url = ApiUrl::new(&api_url).context("Invalid API URL")?;

        Ok(Self {
            api_url,
            user: global.user.clone().or(stored.user),
            user_agent: stored.user_agent,
        })
    }

    fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone());
        match &self.user_agent {
            Some(user_agent) => config.user_agent(user_agent.as_str()),
            None => config,
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        let user = self.user.as_deref()?;
        let password = std::env::var(PASSWORD_ENV).ok()?;
        Some(Credentials::new(user, password))
    }
}

/// Build a client, logging in when a user and password are available.
pub async fn connect(global: &GlobalArgs) -> Result<ApiClient> {
    let settings = Settings::resolve(global)?;
    let mut client = ApiClient::new(settings.client_config()).context("Failed to build client")?;

    if let Some(credentials) = settings.credentials() {
        login(&mut client, credentials).await?;
    }

    Ok(client)
}

/// Build a logged-in client; writes need one.
pub async fn connect_user(global: &GlobalArgs) -> Result<ApiClient> {
    let settings = Settings::resolve(global)?;
    let Some(credentials) = settings.credentials() else {
        bail!("Writes need a login. Pass --user (or WIKI_USER) and set {PASSWORD_ENV}.");
    };

    let mut client = ApiClient::new(settings.client_config()).context("Failed to build client")?;
    login(&mut client, credentials).await?;
    Ok(client)
}

async fn login(client: &mut ApiClient, credentials: Credentials) -> Result<()> {
    let user = credentials.username().to_string();
    eprintln!("{}", format!("Logging in as {user}...").dimmed());

    if !client.login(credentials).await.context("Failed to login")? {
        bail!("Login as '{user}' was refused");
    }
    Ok(())
}
