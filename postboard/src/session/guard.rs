//! Authentication against the single configured credential pair.
//!
//! The guard owns the only valid identity. Handlers pass the caller's
//! `Session` in explicitly; the guard flips its state on login/logout and
//! refuses mutating operations for anonymous sessions.

use tracing::{info, warn};

use crate::error::{BlogError, BlogResult};
use crate::models::{AuthState, Session};

/// The configured username/password pair.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both fields are always compared so a bad username and a bad password
    /// take the same path.
    fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username == username;
        let pass_ok = self.password == password;
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Gatekeeper for login state and mutating operations.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    credentials: Credentials,
}

impl AuthGuard {
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Authenticate `session` if the credentials match.
    ///
    /// On failure the session keeps whatever state it had.
    pub fn login(&self, session: &mut Session, username: &str, password: &str) -> BlogResult<()> {
        if !self.credentials.matches(username, password) {
            warn!(session = %session.id, username, "login rejected");
            return Err(BlogError::InvalidCredentials);
        }

        if !session.is_authenticated() {
            info!(session = %session.id, username, "logged in");
        }
        session.set_auth(AuthState::Authenticated);
        Ok(())
    }

    /// Return `session` to anonymous. Calling it again has no further effect.
    pub fn logout(&self, session: &mut Session) {
        if session.is_authenticated() {
            info!(session = %session.id, "logged out");
        }
        session.set_auth(AuthState::Anonymous);
    }

    /// Refuse with `NotAuthenticated` unless `session` is logged in.
    pub fn require_auth(&self, session: &Session) -> BlogResult<()> {
        if session.is_authenticated() {
            Ok(())
        } else {
            warn!(session = %session.id, state = %session.auth(), "mutating request refused");
            Err(BlogError::NotAuthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn guard() -> AuthGuard {
        AuthGuard::new(Credentials::new("admin", "secret"))
    }

    fn session() -> Session {
        Session::new(Duration::minutes(10))
    }

    #[test]
    fn test_login_success() {
        let mut s = session();
        guard().login(&mut s, "admin", "secret").unwrap();
        assert_eq!(s.auth(), AuthState::Authenticated);
        assert!(guard().require_auth(&s).is_ok());
    }

    #[test]
    fn test_login_rejects_mismatches() {
        for (user, pass) in [
            ("admin", "wrong"),
            ("someuser", "secret"),
            ("someuser", "wrongpass"),
            ("", ""),
        ] {
            let mut s = session();
            let err = guard().login(&mut s, user, pass).unwrap_err();
            assert!(matches!(err, BlogError::InvalidCredentials));
            assert_eq!(s.auth(), AuthState::Anonymous);
        }
    }

    #[test]
    fn test_failed_login_keeps_existing_auth() {
        let mut s = session();
        guard().login(&mut s, "admin", "secret").unwrap();
        assert!(guard().login(&mut s, "admin", "wrong").is_err());
        assert!(s.is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let mut s = session();
        guard().login(&mut s, "admin", "secret").unwrap();

        guard().logout(&mut s);
        assert_eq!(s.auth(), AuthState::Anonymous);
        guard().logout(&mut s);
        assert_eq!(s.auth(), AuthState::Anonymous);
    }

    #[test]
    fn test_require_auth_refuses_anonymous() {
        let err = guard().require_auth(&session()).unwrap_err();
        assert!(matches!(err, BlogError::NotAuthenticated));
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("admin", "secret"));
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("secret"));
    }
}
