//! In-memory session store
//!
//! Holds signed-in sessions, in-flight logins keyed by CSRF state, and the
//! per-session dashboard table. Nothing survives a restart. Sessions expire
//! with their access token and are purged lazily.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use duedash_core::assignments::AssignmentTable;
use duedash_domain::{AssignmentRecord, UserSession};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct PendingLogin {
    code_verifier: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct SessionEntry {
    session: UserSession,
    table: Option<AssignmentTable>,
}

/// Concurrent session store shared by all request handlers
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    pending: Arc<DashMap<String, PendingLogin>>,
    login_timeout: Duration,
    session_ttl: Duration,
}

impl SessionStore {
    /// `login_timeout` bounds the gap between sign-in and callback;
    /// `session_ttl` caps how long a session lives.
    pub fn new(login_timeout: std::time::Duration, session_ttl: std::time::Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            pending: Arc::new(DashMap::new()),
            login_timeout: Duration::from_std(login_timeout).unwrap_or(Duration::MAX),
            session_ttl: Duration::from_std(session_ttl).unwrap_or(Duration::MAX),
        }
    }

    /// Remember the verifier of a login that is waiting for its callback.
    pub fn begin_login(&self, state: impl Into<String>, code_verifier: impl Into<String>, now: DateTime<Utc>) {
        self.purge_expired_logins(now);
        self.pending.insert(
            state.into(),
            PendingLogin { code_verifier: code_verifier.into(), created_at: now },
        );
    }

    /// Consume a pending login. Unknown, reused or expired states yield
    /// `None`.
    pub fn complete_login(&self, state: &str, now: DateTime<Utc>) -> Option<String> {
        let (_, pending) = self.pending.remove(state)?;
        if now - pending.created_at > self.login_timeout {
            debug!("pending login expired");
            return None;
        }
        Some(pending.code_verifier)
    }

    pub fn pending_login_count(&self) -> usize {
        self.pending.len()
    }

    /// Open a session for a freshly issued access token.
    ///
    /// The session ends when the token does (`expires_in` seconds), never
    /// later than the configured TTL.
    pub fn create_session(
        &self,
        access_token: impl Into<String>,
        email: Option<String>,
        expires_in: Option<i64>,
        now: DateTime<Utc>,
    ) -> UserSession {
        self.purge_expired_sessions(now);

        let lifetime = expires_in
            .filter(|secs| *secs > 0)
            .and_then(Duration::try_seconds)
            .map_or(self.session_ttl, |token_life| token_life.min(self.session_ttl));
        let expires_at = now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut session =
            UserSession::new(Uuid::new_v4().to_string(), access_token, now).with_expiry(expires_at);
        session.email = email;

        self.sessions
            .insert(session.id.clone(), SessionEntry { session: session.clone(), table: None });
        session
    }

    /// Live session by id. An expired one is dropped with its table.
    pub fn get(&self, session_id: &str, now: DateTime<Utc>) -> Option<UserSession> {
        let session = self.sessions.get(session_id).map(|entry| entry.session.clone())?;
        if session.is_expired(now) {
            self.sessions.remove(session_id);
            debug!("session expired");
            return None;
        }
        Some(session)
    }

    /// Drop a session and its table. Returns whether it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Snapshot of the session's table, if one was opened.
    pub fn table(&self, session_id: &str) -> Option<AssignmentTable> {
        self.sessions.get(session_id).and_then(|entry| entry.table.clone())
    }

    /// Store the session's table. Ignored if the session is gone.
    pub fn store_table(&self, session_id: &str, table: AssignmentTable) {
        if let Some(mut entry) = self.sessions.get_mut(session_id) {
            entry.table = Some(table);
        }
    }

    /// Apply `update` to an existing table in place.
    pub fn update_table<R>(
        &self,
        session_id: &str,
        update: impl FnOnce(&mut AssignmentTable) -> R,
    ) -> Option<R> {
        let mut entry = self.sessions.get_mut(session_id)?;
        entry.table.as_mut().map(update)
    }

    /// Swap a fresh batch of records into the session's table under one
    /// lock, keeping whatever view state it has by then.
    pub fn refresh_table(&self, session_id: &str, records: Vec<AssignmentRecord>) -> bool {
        let Some(mut entry) = self.sessions.get_mut(session_id) else {
            return false;
        };
        match entry.table.as_mut() {
            Some(table) => table.replace_records(records),
            None => entry.table = Some(AssignmentTable::new(records)),
        }
        true
    }

    fn purge_expired_sessions(&self, now: DateTime<Utc>) {
        self.sessions.retain(|_, entry| !entry.session.is_expired(now));
    }

    fn purge_expired_logins(&self, now: DateTime<Utc>) {
        let timeout = self.login_timeout;
        self.pending.retain(|_, pending| now - pending.created_at <= timeout);
    }
}
