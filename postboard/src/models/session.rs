//! Session model representing one client's authentication state.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Authentication state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No successful login yet, or logged out.
    #[default]
    Anonymous,
    /// Logged in with the configured credentials.
    Authenticated,
}

impl AuthState {
    /// Convert state to a short label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    /// Confirmation of a completed action.
    Info,
    /// A refused or failed action.
    Error,
}

impl FlashLevel {
    /// CSS class used when rendering the message.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Per-client session state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque identifier carried in the session cookie.
    pub id: Uuid,
    auth: AuthState,
    flashes: Vec<Flash>,
    /// When the session stops being valid unless touched again.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a new anonymous session that lives for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4(),
            auth: AuthState::Anonymous,
            flashes: Vec::new(),
            expires_at: Utc::now() + ttl,
        }
    }

    pub const fn auth(&self) -> AuthState {
        self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthState::Authenticated
    }

    pub(crate) fn set_auth(&mut self, auth: AuthState) {
        self.auth = auth;
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Push the expiry forward by `ttl` from now.
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at = Utc::now() + ttl;
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&mut self, level: FlashLevel, message: impl Into<String>) {
        self.flashes.push(Flash {
            level,
            message: message.into(),
        });
    }

    /// Remove and return all queued messages.
    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    /// Anonymous with nothing queued: indistinguishable from a new session.
    pub fn is_blank(&self) -> bool {
        !self.is_authenticated() && self.flashes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new(Duration::minutes(5));
        assert_eq!(session.auth(), AuthState::Anonymous);
        assert!(!session.is_authenticated());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_session_expired() {
        let session = Session::new(Duration::minutes(-1));
        assert!(session.is_expired());
    }

    #[test]
    fn test_touch_extends_expiry() {
        let mut session = Session::new(Duration::minutes(-1));
        session.touch(Duration::minutes(5));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_flashes_are_drained_once() {
        let mut session = Session::new(Duration::minutes(5));
        session.flash(FlashLevel::Info, "You were logged in");
        session.flash(FlashLevel::Error, "Title required");

        let flashes = session.take_flashes();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "You were logged in");
        assert_eq!(flashes[1].level, FlashLevel::Error);
        assert!(session.take_flashes().is_empty());
    }

    #[test]
    fn test_blank_session() {
        let mut session = Session::new(Duration::minutes(5));
        assert!(session.is_blank());

        session.flash(FlashLevel::Info, "You were logged out");
        assert!(!session.is_blank());
        session.take_flashes();
        assert!(session.is_blank());

        session.set_auth(AuthState::Authenticated);
        assert!(!session.is_blank());
    }
}
