//! Ephemeral per-tab session records.

use std::collections::HashMap;

use autofill_protocols::{AutofillRequest, BackendKind, Credentials, TabId};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

/// Pipeline stage a session is waiting in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingExtraction,
    Generating,
    Executing,
}

/// One in-flight autofill request.
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    pub tab_id: TabId,
    pub profile: String,
    pub credentials: Credentials,
    pub model: String,
    pub backend: BackendKind,
    pub phase: SessionPhase,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(tab_id: TabId, request: AutofillRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            tab_id,
            profile: request.profile,
            credentials: request.credentials,
            model: request.model,
            backend: request.backend,
            phase: SessionPhase::AwaitingExtraction,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("tab_id", &self.tab_id)
            .field("backend", &self.backend)
            .field("model", &self.model)
            .field("phase", &self.phase)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// At most one session per tab. Each operation holds the lock for its whole
/// read-modify-write, so no reader ever sees a half-removed record.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<TabId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, returning the one it replaced.
    pub fn put(&self, session: Session) -> Option<Session> {
        self.sessions.lock().insert(session.tab_id, session)
    }

    pub fn get(&self, tab: TabId) -> Option<Session> {
        self.sessions.lock().get(&tab).cloned()
    }

    /// Move session `id` of `tab` from `from` to `to`. Returns the updated
    /// session, or `None` when the tab has no such session in that phase.
    pub fn advance(
        &self,
        tab: TabId,
        id: Uuid,
        from: SessionPhase,
        to: SessionPhase,
    ) -> Option<Session> {
        let mut sessions = self.sessions.lock();
        let session = sessions.get_mut(&tab)?;
        if session.id != id || session.phase != from {
            return None;
        }
        session.phase = to;
        Some(session.clone())
    }

    /// Whether `id` is still the live session of `tab`.
    pub fn is_current(&self, tab: TabId, id: Uuid) -> bool {
        self.sessions.lock().get(&tab).is_some_and(|s| s.id == id)
    }

    pub fn remove(&self, tab: TabId) -> Option<Session> {
        self.sessions.lock().remove(&tab)
    }

    /// Remove the tab's session only if it is still session `id`.
    pub fn remove_if(&self, tab: TabId, id: Uuid) -> Option<Session> {
        let mut sessions = self.sessions.lock();
        if sessions.get(&tab).is_some_and(|s| s.id == id) {
            sessions.remove(&tab)
        } else {
            None
        }
    }

    /// Remove the tab's session only if it is in `phase`.
    pub fn remove_in_phase(&self, tab: TabId, phase: SessionPhase) -> Option<Session> {
        let mut sessions = self.sessions.lock();
        if sessions.get(&tab).is_some_and(|s| s.phase == phase) {
            sessions.remove(&tab)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
