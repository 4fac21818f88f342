//! Session Store
//!
//! Process-local registry of what-if sessions. The lock is never held
//! across the collaborator await; the session's sequence/revision check
//! decides which response applies. Sessions idle past the TTL are evicted
//! on insert and on access.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::session::{RecalcOutcome, SessionSnapshot, WhatIfSession, SIMULATION_PERSIST};
use crate::predictor::{Predictor, PredictorError};

/// Recalculation failures surfaced to the caller
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecalcError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Predictor(#[from] PredictorError),
}

/// Idle sessions older than this are dropped
pub const DEFAULT_IDLE_TTL_MINUTES: i64 = 30;

struct Entry {
    session: WhatIfSession,
    last_access: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_IDLE_TTL_MINUTES))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions expire after `idle_ttl` without access
    pub fn with_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_ttl,
        }
    }

    /// Insert, sweeping idle sessions first
    pub fn insert(&self, session: WhatIfSession) -> Uuid {
        let now = Utc::now();
        let id = session.id();
        let mut sessions = self.sessions.lock();

        let before = sessions.len();
        sessions.retain(|_, e| now - e.last_access <= self.idle_ttl);
        if sessions.len() < before {
            tracing::info!("Evicted {} idle session(s)", before - sessions.len());
        }

        sessions.insert(id, Entry { session, last_access: now });
        id
    }

    /// Run `f` against a session under the lock. Refreshes its idle timer;
    /// an expired session is dropped and reported as missing.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut WhatIfSession) -> R) -> Option<R> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();

        let expired = now - sessions.get(&id)?.last_access > self.idle_ttl;
        if expired {
            sessions.remove(&id);
            tracing::info!("Session {} expired", id);
            return None;
        }

        let entry = sessions.get_mut(&id)?;
        entry.last_access = now;
        Some(f(&mut entry.session))
    }

    pub fn snapshot(&self, id: Uuid) -> Option<SessionSnapshot> {
        self.with_session(id, |s| s.snapshot())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.lock().remove(&id).is_some()
    }

    /// Drop sessions idle as of `now`; returns how many went
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, e| now - e.last_access <= self.idle_ttl);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// begin -> predict (unlocked) -> complete
    pub async fn recalculate(&self, id: Uuid, predictor: &dyn Predictor) -> Result<RecalcOutcome, RecalcError> {
        let ticket = self
            .with_session(id, |s| s.begin_recalculation())
            .ok_or(RecalcError::SessionNotFound(id))?;

        let result = match predictor
            .predict(&ticket.model_id, &ticket.input, SIMULATION_PERSIST)
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Recalculation #{} for session {} failed: {}", ticket.seq, id, e);
                return Err(e.into());
            }
        };

        self.with_session(id, |s| s.complete_recalculation(&ticket, result))
            .ok_or(RecalcError::SessionNotFound(id))
    }
}
