//! Per-user sessions holding the uploaded resume text between requests.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// One user's working session. Created on resume upload, removed on DELETE
/// or after sitting idle longer than the store's TTL.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub resume_filename: String,
    pub resume_text: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active > ttl
    }
}

/// What clients see of a session. The resume text itself is not echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub resume_filename: String,
    pub resume_chars: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            resume_filename: session.resume_filename.clone(),
            resume_chars: session.resume_text.chars().count(),
            created_at: session.created_at,
        }
    }
}

/// In-memory session map shared through `AppState`.
/// Sessions idle for longer than `ttl` are treated as gone and dropped lazily
/// on access, on `create`, and by the periodic `evict_expired` sweep.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_SESSION_TTL_SECS as i64))
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self, resume_filename: String, resume_text: String) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            resume_filename,
            resume_text,
            created_at: now,
            last_active: now,
        };
        let mut sessions = self.inner.write().await;
        let ttl = self.ttl;
        sessions.retain(|_, s| !s.is_expired(now, ttl));
        sessions.insert(session.id, session.clone());
        info!("Created session {}", session.id);
        session
    }

    /// Returns a live session and marks it active. An expired session is removed
    /// and reported as missing.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let expired = sessions.get(&id)?.is_expired(now, self.ttl);
        if expired {
            sessions.remove(&id);
            info!("Session {id} expired");
            return None;
        }
        let session = sessions.get_mut(&id)?;
        session.last_active = now;
        Some(session.clone())
    }

    /// Drops every session idle past the TTL. Returns how many were removed.
    pub async fn evict_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        let ttl = self.ttl;
        sessions.retain(|_, s| !s.is_expired(now, ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions");
        } else {
            debug!("No idle sessions to evict");
        }
        evicted
    }

    /// Removes a session. Returns false if it did not exist or had already expired.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self
            .inner
            .write()
            .await
            .remove(&id)
            .is_some_and(|s| !s.is_expired(Utc::now(), self.ttl));
        if removed {
            info!("Cleared session {id}");
        }
        removed
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Moves a session's last activity into the past.
    #[cfg(test)]
    pub async fn backdate(&self, id: Uuid, by: Duration) {
        if let Some(session) = self.inner.write().await.get_mut(&id) {
            session.last_active = session.last_active - by;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = SessionStore::default();
        let session = store
            .create("cv.pdf".to_string(), "Rust engineer".to_string())
            .await;

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.resume_text, "Rust engineer");
        assert_eq!(store.len().await, 1);

        assert!(store.remove(session.id).await);
        assert!(store.get(session.id).await.is_none());
        assert!(!store.remove(session.id).await);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        let a = store.create("a.pdf".to_string(), "alpha".to_string()).await;
        let b = store.create("b.docx".to_string(), "beta".to_string()).await;
        assert_ne!(a.id, b.id);
        store.remove(a.id).await;
        assert_eq!(store.get(b.id).await.unwrap().resume_text, "beta");
    }

    #[test]
    fn test_summary_counts_chars_not_bytes() {
        let session = Session {
            id: Uuid::new_v4(),
            resume_filename: "cv.docx".to_string(),
            resume_text: "café".to_string(),
            created_at: Utc::now(),
            last_active: Utc::now(),
        };
        assert_eq!(SessionSummary::from(&session).resume_chars, 4);
    }

    #[tokio::test]
    async fn test_idle_session_expires_on_get() {
        let store = SessionStore::new(Duration::minutes(30));
        let session = store.create("cv.pdf".to_string(), "Go developer".to_string()).await;

        store.backdate(session.id, Duration::minutes(31)).await;
        assert!(store.get(session.id).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_get_refreshes_activity() {
        let store = SessionStore::new(Duration::minutes(30));
        let session = store.create("cv.pdf".to_string(), "Go developer".to_string()).await;

        store.backdate(session.id, Duration::minutes(20)).await;
        assert!(store.get(session.id).await.is_some());
        store.backdate(session.id, Duration::minutes(20)).await;
        assert!(store.get(session.id).await.is_some());
    }

    #[tokio::test]
    async fn test_sweep_keeps_live_sessions() {
        let store = SessionStore::new(Duration::minutes(30));
        let stale = store.create("a.pdf".to_string(), "alpha".to_string()).await;
        let live = store.create("b.pdf".to_string(), "beta".to_string()).await;

        store.backdate(stale.id, Duration::hours(2)).await;
        assert_eq!(store.evict_expired().await, 1);
        assert_eq!(store.evict_expired().await, 0);
        assert!(store.get(live.id).await.is_some());
    }
}
