//! Authentication state owned by one client.

use super::credentials::Credentials;

/// The login state of an [`ApiClient`](crate::ApiClient).
///
/// A session starts anonymous and only [`login`](crate::ApiClient::login)
/// changes it. The cookie store that carries the server-side login lives in
/// the client's transport; together they make up one logical session, which
/// is never shared between clients.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<String>,
    credentials: Option<Credentials>,
    assert_user: bool,
}

impl Session {
    /// An anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The authenticated username, if a login succeeded.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Whether requests carry `assert=user`.
    pub fn asserts_user(&self) -> bool {
        self.assert_user
    }

    /// Whether a login ever succeeded on this session.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The credential from the last successful login.
    pub(crate) fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Record a successful login.
    pub(crate) fn authenticated(&mut self, user: String, credentials: Credentials, assert_user: bool) {
        self.user = Some(user);
        self.credentials = Some(credentials);
        self.assert_user = assert_user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(!session.asserts_user());
        assert!(session.credentials().is_none());
    }

    #[test]
    fn records_login() {
        let mut session = Session::anonymous();
        session.authenticated("Bot".into(), Credentials::new("Bot", "pw"), true);
        assert_eq!(session.user(), Some("Bot"));
        assert!(session.asserts_user());
        assert_eq!(session.credentials().map(|c| c.username()), Some("Bot"));
    }
}
