//! Login, identity checks and token fetching.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::auth::{Credentials, Token, TokenKind};
use crate::codec::Params;
use crate::error::AuthError;
use crate::records::UserInfo;
use crate::transport::Transport;

use super::ApiClient;

const LOGIN_SUCCESS: &str = "Success";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    result: String,
    #[serde(default)]
    lgusername: Option<String>,
    #[serde(default)]
    reason: Option<Value>,
}

impl<T: Transport> ApiClient<T> {
    /// Log in with a username and password (or bot password).
    ///
    /// Returns `Ok(false)` when the server refuses the credentials; the
    /// session is then left as it was. On success the session records the
    /// user and the credential, and later requests carry `assert=user` if
    /// [`ClientConfig::assert_user`](crate::ClientConfig::assert_user) is set.
    ///
    /// # Errors
    ///
    /// Returns an error only if the server cannot be reached or the response
    /// cannot be decoded.
    #[instrument(skip(self, credentials), fields(user = %credentials.username()))]
    pub async fn login(&mut self, credentials: Credentials) -> Result<bool> {
        info!("Logging in");

        let token = self.fetch_token(TokenKind::Login).await?;
        let params = Params::action("login")
            .set("lgname", credentials.username())
            .set("lgpassword", credentials.password())
            .set("lgtoken", token.into_value());

        let response = match self.post(&params).await {
            Ok(response) => response,
            Err(err) if err.as_protocol().is_some_and(|e| e.code().is_some()) => {
                warn!(error = %err, "Login rejected");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        let login: LoginResponse = response.extract(&["login"])?;
        if login.result != LOGIN_SUCCESS {
            warn!(result = %login.result, reason = ?login.reason, "Login refused");
            return Ok(false);
        }

        let user = login
            .lgusername
            .unwrap_or_else(|| credentials.username().to_string());
        debug!(%user, "Logged in");

        let assert_user = self.config.assert_user;
        self.session.authenticated(user, credentials, assert_user);
        Ok(true)
    }

    /// Check that the server still sees the expected identity.
    ///
    /// Without a recorded login this is true when the server reports any
    /// non-anonymous user. After a login it is true only when the server
    /// reports exactly the recorded user.
    pub async fn logged_in(&self) -> Result<bool> {
        let info = self.user_info().await?;
        Ok(match self.session.user() {
            None => !info.anon,
            Some(user) => info.name == user,
        })
    }

    /// The identity the server associates with this session.
    pub async fn user_info(&self) -> Result<UserInfo> {
        let params = Params::action("query").set("meta", "userinfo");
        Ok(self.get(&params).await?.extract(&["query", "userinfo"])?)
    }

    /// Fetch a fresh single-use token.
    ///
    /// Login tokens are fetched without `assert=user`: they are what a
    /// lapsed session needs to recover.
    pub(crate) async fn fetch_token(&self, kind: TokenKind) -> Result<Token> {
        let params = Params::action("query")
            .set("meta", "tokens")
            .set("type", kind.as_str());
        let params = match kind {
            TokenKind::Login => params,
            _ => self.with_assert(params),
        };

        let value: String = self
            .get(&params)
            .await?
            .extract(&["query", "tokens", kind.response_key()])?;
        Ok(Token::new(kind, value))
    }

    /// Log in again with the credential of the last successful login.
    pub(crate) async fn relogin(&mut self) -> Result<()> {
        let credentials = self
            .session
            .credentials()
            .cloned()
            .ok_or(AuthError::NoCredentials)?;
        let user = credentials.username().to_string();

        if self.login(credentials).await? {
            Ok(())
        } else {
            Err(AuthError::ReloginFailed { user }.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedTransport;
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::Error;
    use crate::transport::Method;
    use crate::types::ApiUrl;

    const LOGIN_TOKEN: &str = r#"{"batchcomplete":true,"query":{"tokens":{"logintoken":"abc+\\"}}}"#;

    fn client(replies: &[&str]) -> ApiClient<ScriptedTransport> {
        let config = ClientConfig::new(ApiUrl::new("https://wiki.example.org/w/api.php").unwrap());
        ApiClient::with_transport(config, ScriptedTransport::new(replies.iter().copied()))
    }

    #[tokio::test]
    async fn successful_login_records_session() {
        let mut client = client(&[
            LOGIN_TOKEN,
            r#"{"login":{"result":"Success","lguserid":7,"lgusername":"Example"}}"#,
        ]);

        assert!(client.login(Credentials::new("Example@bot", "pw")).await.unwrap());
        assert_eq!(client.session().user(), Some("Example"));
        assert!(client.session().asserts_user());

        let sent = client.transport().sent();
        assert_eq!(sent[0].method, Method::Get);
        assert!(sent[0].url.contains("type=login"));
        assert!(!sent[0].url.contains("assert="));
        assert_eq!(sent[1].method, Method::Post);
        let body = sent[1].body.as_deref().unwrap();
        assert!(body.contains("lgname=Example%40bot"));
        assert!(body.contains("lgtoken=abc%2B%5C"));
        assert!(!body.contains("assert="));
    }

    #[tokio::test]
    async fn refused_login_leaves_session_anonymous() {
        let mut client = client(&[
            LOGIN_TOKEN,
            r#"{"login":{"result":"Failed","reason":"Incorrect username or password entered."}}"#,
        ]);

        assert!(!client.login(Credentials::new("Example", "wrong")).await.unwrap());
        assert!(!client.session().is_authenticated());
        assert!(!client.session().asserts_user());
    }

    #[tokio::test]
    async fn relogin_without_credentials_fails() {
        let mut client = client(&[]);
        let err = client.relogin().await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::NoCredentials)));
        assert!(client.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn logged_in_compares_recorded_user() {
        let mut client = client(&[
            r#"{"query":{"userinfo":{"id":0,"name":"192.0.2.1","anon":true}}}"#,
            LOGIN_TOKEN,
            r#"{"login":{"result":"Success","lgusername":"Example"}}"#,
            r#"{"query":{"userinfo":{"id":3,"name":"Someone Else"}}}"#,
        ]);

        assert!(!client.logged_in().await.unwrap());
        assert!(client.login(Credentials::new("Example", "pw")).await.unwrap());
        assert!(!client.logged_in().await.unwrap());
    }
}
