use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use wiremock::MockServer;

/// Endpoint path served by the mock wiki.
pub const API_PATH: &str = "/w/api.php";

/// The mock server's endpoint URL.
pub fn api_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}{}", server.address().port(), API_PATH)
}

/// Build a CLI command isolated from the user's configuration and
/// environment.
pub fn cli(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wiki"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env_remove("WIKI_API_URL");
    cmd.env_remove("WIKI_USER");
    cmd.env_remove("WIKI_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI against the mock server.
pub async fn run_cli(args: &[&str], home: &Path, server: &MockServer) -> Output {
    cli(args, home)
        .env("WIKI_API_URL", api_url(server))
        .output()
        .await
        .expect("Failed to execute CLI")
}

/// Run the CLI against the mock server and expect success.
pub async fn run_cli_success(args: &[&str], home: &Path, server: &MockServer) -> String {
    let output = run_cli(args, home, server).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
