//! CLI tests against a mock wiki.
//!
//! Each test gets its own temporary HOME so the saved configuration never
//! leaks between tests or into the user's real config directory.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{API_PATH, api_url, cli, run_cli, run_cli_success};

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount_login(server: &MockServer, user: &str) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("type", "login"))
        .respond_with(ok(json!({"query": {"tokens": {"logintoken": "lt+\\"}}})))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("action=login"))
        .respond_with(ok(json!({"login": {"result": "Success", "lgusername": user}})))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_run_page(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("titles", "User:ExampleBot/Run"))
        .respond_with(ok(json!({"query": {"pages": [{
            "pageid": 100,
            "ns": 2,
            "title": "User:ExampleBot/Run",
            "revisions": [{
                "revid": 5,
                "parentid": 4,
                "timestamp": "2024-04-01T00:00:00Z",
                "slots": {"main": {"content": content}}
            }]
        }]}})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_missing_api_url_is_reported() {
    let home = TempDir::new().unwrap();

    let output = cli(&["page", "Sandbox"], home.path()).output().await.unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No API URL"));
}

#[tokio::test]
async fn test_configure_then_whoami_uses_saved_endpoint() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("meta", "userinfo"))
        .respond_with(ok(json!({"query": {"userinfo": {"id": 0, "name": "127.0.0.1", "anon": true}}})))
        .expect(2)
        .mount(&server)
        .await;

    let url = api_url(&server);
    let output = cli(&["--api-url", &url, "configure", "--user-agent", "TestBot/0.1"], home.path())
        .output()
        .await
        .unwrap();
    assert!(output.status.success());

    let config = std::fs::read_to_string(home.path().join("config/wiki/config.json")).unwrap();
    let config: Value = serde_json::from_str(&config).unwrap();
    assert_eq!(config["api_url"], url.as_str());
    assert_eq!(config["user_agent"], "TestBot/0.1");

    // No --api-url and no WIKI_API_URL: the saved endpoint is used.
    let output = cli(&["whoami"], home.path()).output().await.unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("127.0.0.1"));
    assert!(stdout.contains("false"));
}

#[tokio::test]
async fn test_page_prints_text() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("prop", "revisions"))
        .and(query_param("titles", "Sandbox"))
        .respond_with(ok(json!({"query": {"pages": [{
            "pageid": 7,
            "ns": 0,
            "title": "Sandbox",
            "revisions": [{
                "revid": 11,
                "parentid": 10,
                "timestamp": "2024-04-01T00:00:01Z",
                "slots": {"main": {"content": "Hello, world"}}
            }]
        }]}})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(&["page", "Sandbox"], home.path(), &server).await;
    assert_eq!(stdout.trim(), "Hello, world");
}

#[tokio::test]
async fn test_list_all_follows_cursors() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("list", "allpages"))
        .and(query_param_is_missing("apcontinue"))
        .respond_with(ok(json!({
            "query-continue": {"allpages": {"apcontinue": "Foo c"}},
            "query": {"allpages": [
                {"pageid": 1, "ns": 0, "title": "Foo a"},
                {"pageid": 2, "ns": 0, "title": "Foo b"}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("apcontinue", "Foo c"))
        .respond_with(ok(json!({"query": {"allpages": [{"pageid": 3, "ns": 0, "title": "Foo c"}]}})))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_cli_success(
        &["list", "prefix", "Foo", "--limit", "2", "--all"],
        home.path(),
        &server,
    )
    .await;

    let titles: Vec<String> = stdout
        .lines()
        .map(|line| serde_json::from_str::<Value>(line).unwrap()["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Foo a", "Foo b", "Foo c"]);
}

#[tokio::test]
async fn test_list_single_page_prints_cursor() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("list", "categorymembers"))
        .and(query_param("cmtitle", "Category:Bots"))
        .respond_with(ok(json!({
            "query-continue": {"categorymembers": {"cmcontinue": "page|X|9"}},
            "query": {"categorymembers": [{"pageid": 9, "ns": 2, "title": "User:ExampleBot"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["list", "members", "Bots", "--limit", "1"], home.path(), &server).await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page|X|9"));
}

#[tokio::test]
async fn test_edit_requires_credentials() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(path(API_PATH))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(&["edit", "Sandbox", "--text", "x"], home.path(), &server).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WIKI_PASSWORD"));
}

#[tokio::test]
async fn test_edit_denied_by_run_page_submits_nothing() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    mount_login(&server, "ExampleBot").await;

    mount_run_page(&server, "no").await;

    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("action=edit"))
        .respond_with(ok(json!({"edit": {"result": "Success"}})))
        .expect(0)
        .mount(&server)
        .await;

    let output = cli(&["--user", "ExampleBot", "edit", "Sandbox", "--text", "x"], home.path())
        .env("WIKI_API_URL", api_url(&server))
        .env("WIKI_PASSWORD", "secret")
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Write denied"));
}

#[tokio::test]
async fn test_whoami_names_disabling_run_page() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    mount_login(&server, "ExampleBot").await;
    mount_run_page(&server, "disabled for maintenance").await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("meta", "userinfo"))
        .and(query_param_is_missing("prop"))
        .respond_with(ok(json!({"query": {"userinfo": {"id": 42, "name": "ExampleBot"}}})))
        .mount(&server)
        .await;

    let output = cli(&["--user", "ExampleBot", "whoami", "--check-run"], home.path())
        .env("WIKI_API_URL", api_url(&server))
        .env("WIKI_PASSWORD", "secret")
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Writes enabled"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("User:ExampleBot/Run does not enable writes"));
}
