//! Server-side session storage keyed by the cookie id.
//!
//! Only sessions that carry state are stored: an authenticated login or a
//! queued flash. Blank anonymous sessions are handed out but never kept, so
//! cookieless traffic does not grow the table.

use std::collections::HashMap;

use chrono::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Flash, FlashLevel, Session};

/// In-memory session table with sliding idle expiry.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Load a copy of the session for `id`, or a fresh unsaved anonymous one.
    ///
    /// Expired sessions are swept first, so an expired id yields a new
    /// session. A stored session's expiry is refreshed in place.
    pub async fn resolve(&self, id: Option<Uuid>) -> Session {
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, session| !session.is_expired());

        if let Some(session) = id.and_then(|id| sessions.get_mut(&id)) {
            session.touch(self.ttl);
            return session.clone();
        }
        Session::new(self.ttl)
    }

    /// Write back a session whose auth state changed.
    ///
    /// Blank sessions are dropped instead. Returns whether the session is
    /// stored, i.e. whether the client needs its cookie.
    pub async fn save(&self, session: Session) -> bool {
        let mut sessions = self.sessions.lock().await;
        if session.is_blank() {
            sessions.remove(&session.id);
            return false;
        }
        sessions.insert(session.id, session);
        true
    }

    /// Queue a flash on the stored session for `session.id`.
    ///
    /// Only the flash queue of an already stored session is touched. An id
    /// that is not stored starts a new anonymous session under that id.
    pub async fn flash(&self, session: &Session, level: FlashLevel, message: impl Into<String>) {
        let mut sessions = self.sessions.lock().await;
        let stored = sessions.entry(session.id).or_insert_with(|| {
            debug!(session = %session.id, "session started");
            let mut fresh = Session::new(self.ttl);
            fresh.id = session.id;
            fresh
        });
        stored.flash(level, message);
    }

    /// Drain queued flashes of the stored session without touching its auth
    /// state. A session left blank is dropped.
    pub async fn take_flashes(&self, session: &Session) -> Vec<Flash> {
        let mut sessions = self.sessions.lock().await;
        let Some(stored) = sessions.get_mut(&session.id) else {
            return Vec::new();
        };
        let flashes = stored.take_flashes();
        if stored.is_blank() {
            sessions.remove(&session.id);
        }
        flashes
    }

    /// Move `session` to a new id and store it there, forgetting the old id.
    pub async fn rotate(&self, session: &mut Session) {
        let mut sessions = self.sessions.lock().await;
        let old = session.id;
        sessions.remove(&old);
        session.id = Uuid::new_v4();
        sessions.insert(session.id, session.clone());
        debug!(from = %old, to = %session.id, "session id rotated");
    }

    /// Number of stored sessions.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
