//! Gated writes with a single stale-token recovery.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, instrument, warn};

use crate::Result;
use crate::auth::TokenKind;
use crate::codec::{Params, ResponseTree};
use crate::error::ProtocolError;
use crate::records::{EditResult, MoveResult, RollbackResult, WriteOutcome};
use crate::transport::Transport;
use crate::types::Title;

use super::ApiClient;

/// Re-logins allowed per write after a stale-token response.
const STALE_TOKEN_RETRIES: usize = 1;

const EDIT_SUCCESS: &str = "Success";

/// A write that goes through the gate and token cycle.
trait WriteAction {
    type Output;

    const ACTION: &'static str;

    fn token_kind(&self) -> TokenKind {
        TokenKind::Csrf
    }

    fn target(&self) -> &Title;

    /// Parameters without `token` or `assert`.
    fn params(&self) -> Params;

    fn output(response: &ResponseTree) -> Result<Self::Output>;
}

/// A page edit.
///
/// ```
/// use wikiapi::{EditRequest, Title};
///
/// let edit = EditRequest::new(Title::new("Sandbox").unwrap(), "Hello")
///     .summary("test edit")
///     .minor(true);
/// assert_eq!(edit.title().as_str(), "Sandbox");
/// ```
#[derive(Clone, Debug)]
pub struct EditRequest {
    title: Title,
    text: String,
    summary: String,
    minor: bool,
    bot: bool,
    start_timestamp: Option<DateTime<Utc>>,
    base_timestamp: Option<DateTime<Utc>>,
}

impl EditRequest {
    /// Replace the page text. Edits are flagged as bot edits by default.
    pub fn new(title: Title, text: impl Into<String>) -> Self {
        Self {
            title,
            text: text.into(),
            summary: String::new(),
            minor: false,
            bot: true,
            start_timestamp: None,
            base_timestamp: None,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn minor(mut self, minor: bool) -> Self {
        self.minor = minor;
        self
    }

    pub fn bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    /// When editing began; lets the server detect a deletion since then.
    pub fn start_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.start_timestamp = Some(ts);
        self
    }

    /// Timestamp of the revision the edit is based on, for conflict detection.
    pub fn base_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.base_timestamp = Some(ts);
        self
    }
}

fn api_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl WriteAction for EditRequest {
    type Output = EditResult;
    const ACTION: &'static str = "edit";

    fn target(&self) -> &Title {
        &self.title
    }

    fn params(&self) -> Params {
        let params = Params::action(Self::ACTION)
            .set("title", &self.title)
            .set("text", &self.text)
            .set("summary", &self.summary);
        let params = if self.minor {
            params.set("minor", "1")
        } else {
            params.set("notminor", "1")
        };
        params
            .flag("bot", self.bot)
            .opt("starttimestamp", self.start_timestamp.as_ref().map(api_timestamp))
            .opt("basetimestamp", self.base_timestamp.as_ref().map(api_timestamp))
    }

    fn output(response: &ResponseTree) -> Result<EditResult> {
        let edit: EditResult = response.extract(&["edit"])?;
        if edit.result != EDIT_SUCCESS {
            return Err(ProtocolError::Rejected {
                action: Self::ACTION.to_string(),
                result: edit.result,
            }
            .into());
        }
        Ok(edit)
    }
}

struct MoveAction<'a> {
    from: &'a Title,
    to: &'a Title,
    reason: &'a str,
}

impl WriteAction for MoveAction<'_> {
    type Output = MoveResult;
    const ACTION: &'static str = "move";

    fn target(&self) -> &Title {
        self.from
    }

    fn params(&self) -> Params {
        Params::action(Self::ACTION)
            .set("from", self.from)
            .set("to", self.to)
            .set("reason", self.reason)
    }

    fn output(response: &ResponseTree) -> Result<MoveResult> {
        Ok(response.extract(&["move"])?)
    }
}

struct RollbackAction<'a> {
    title: &'a Title,
    user: &'a str,
    summary: &'a str,
}

impl WriteAction for RollbackAction<'_> {
    type Output = RollbackResult;
    const ACTION: &'static str = "rollback";

    fn token_kind(&self) -> TokenKind {
        TokenKind::Rollback
    }

    fn target(&self) -> &Title {
        self.title
    }

    fn params(&self) -> Params {
        Params::action(Self::ACTION)
            .set("title", self.title)
            .set("user", self.user)
            .set("summary", self.summary)
    }

    fn output(response: &ResponseTree) -> Result<RollbackResult> {
        let rollback: RollbackResult = response.extract(&["rollback"])?;
        if !rollback.is_effective() {
            return Err(ProtocolError::Rejected {
                action: Self::ACTION.to_string(),
                result: format!("no revision created (revid {})", rollback.revid),
            }
            .into());
        }
        Ok(rollback)
    }
}

impl<T: Transport> ApiClient<T> {
    /// Replace the text of a page.
    ///
    /// Returns [`WriteOutcome::Denied`] without submitting anything when
    /// [`allowed_to_run`](Self::allowed_to_run) is false.
    ///
    /// # Errors
    ///
    /// Fails if the server reports an error or a result other than
    /// `Success`. A stale token is recovered from once by logging in again
    /// with the stored credential; a second stale token is returned as an
    /// error.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn edit(&mut self, request: &EditRequest) -> Result<WriteOutcome<EditResult>> {
        self.submit(request).await
    }

    /// Move a page to a new title.
    #[instrument(skip(self, reason), fields(from = %from, to = %to))]
    pub async fn move_page(
        &mut self,
        from: &Title,
        to: &Title,
        reason: &str,
    ) -> Result<WriteOutcome<MoveResult>> {
        self.submit(&MoveAction { from, to, reason }).await
    }

    /// Revert the latest consecutive edits of `user` on a page.
    ///
    /// Only a rollback that created a new revision counts as applied; any
    /// other result is a [`ProtocolError::Rejected`].
    #[instrument(skip(self, summary), fields(title = %title, user = %user))]
    pub async fn rollback(
        &mut self,
        title: &Title,
        user: &str,
        summary: &str,
    ) -> Result<WriteOutcome<RollbackResult>> {
        self.submit(&RollbackAction {
            title,
            user,
            summary,
        })
        .await
    }

    /// Gate check, fresh token, submit; once more after a stale token.
    async fn submit<W: WriteAction>(&mut self, action: &W) -> Result<WriteOutcome<W::Output>> {
        let mut relogins = 0;
        loop {
            if !self.allowed_to_run().await {
                warn!(action = W::ACTION, target = %action.target(), "Run page disallows writes");
                return Ok(WriteOutcome::Denied);
            }

            let token = self.fetch_token(action.token_kind()).await?;
            let params = self
                .with_assert(action.params())
                .set("token", token.into_value());

            match self.post(&params).await.and_then(|response| W::output(&response)) {
                Ok(output) => {
                    info!(action = W::ACTION, target = %action.target(), "Write applied");
                    return Ok(WriteOutcome::Applied(output));
                }
                Err(err) if err.is_bad_token() && relogins < STALE_TOKEN_RETRIES => {
                    relogins += 1;
                    warn!(action = W::ACTION, "Stale token, logging in again");
                    self.relogin().await?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
