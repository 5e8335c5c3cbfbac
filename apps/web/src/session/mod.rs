//! Per-browser session state.
//!
//! Each session owns one `SessionContext` behind its own async mutex. Handlers
//! hold that mutex for the whole interaction, so a session processes one
//! event at a time while different sessions proceed independently.

pub mod controller;

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::evaluation::{EvaluationRequest, EvaluationResult};

pub const SESSION_COOKIE: &str = "ats_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    SuggestionsShown,
}

/// The last evaluation shown in this session, kept for redraws and the
/// suggestion prompt.
#[derive(Debug, Clone)]
pub struct StoredEvaluation {
    pub request: EvaluationRequest,
    pub result: EvaluationResult,
}

#[derive(Debug)]
pub struct SessionContext {
    seek_suggestions: bool,
    last: Option<StoredEvaluation>,
    last_seen: DateTime<Utc>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            seek_suggestions: false,
            last: None,
            last_seen: Utc::now(),
        }
    }
}

impl SessionContext {
    pub fn phase(&self) -> SessionPhase {
        if self.seek_suggestions {
            SessionPhase::SuggestionsShown
        } else {
            SessionPhase::Idle
        }
    }

    /// `Idle → SuggestionsShown`. There is no way back within a session.
    pub fn reveal_suggestions(&mut self) {
        self.seek_suggestions = true;
    }

    pub fn last_evaluation(&self) -> Option<&StoredEvaluation> {
        self.last.as_ref()
    }

    pub fn store_evaluation(&mut self, evaluation: StoredEvaluation) {
        self.last = Some(evaluation);
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

pub type SessionHandle = Arc<Mutex<SessionContext>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: Duration::minutes(idle_minutes),
        }
    }

    /// Looks up `id`, or starts a fresh session when it is absent or unknown.
    /// Returns the id the client should carry from now on.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SessionHandle) {
        if let Some(id) = id {
            let existing = self.sessions.read().await.get(&id).cloned();
            if let Some(handle) = existing {
                return (id, handle);
            }
        }

        self.prune_idle().await;

        let id = Uuid::new_v4();
        let handle: SessionHandle = Arc::new(Mutex::new(SessionContext::default()));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id, handle.clone());
        info!("Started session {id} ({} active)", sessions.len());
        (id, handle)
    }

    /// Drops sessions idle for longer than the configured timeout. Sessions
    /// busy with a request are skipped.
    async fn prune_idle(&self) {
        let cutoff = Utc::now() - self.idle_timeout;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(ctx) => ctx.last_seen >= cutoff,
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Pruned {removed} idle sessions");
        }
    }
}

/// Reads the session id from the `Cookie` header, if present and well-formed.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_new_session_starts_idle() {
        let ctx = SessionContext::default();
        assert_eq!(ctx.phase(), SessionPhase::Idle);
        assert!(ctx.last_evaluation().is_none());
    }

    #[test]
    fn test_reveal_is_irreversible() {
        let mut ctx = SessionContext::default();
        ctx.reveal_suggestions();
        ctx.reveal_suggestions();
        assert_eq!(ctx.phase(), SessionPhase::SuggestionsShown);
    }

    #[test]
    fn test_cookie_round_trips_through_headers() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; {SESSION_COOKIE}={id}");
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("ats_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_set_cookie_value() {
        let id = Uuid::nil();
        assert_eq!(
            session_cookie(id),
            "ats_session=00000000-0000-0000-0000-000000000000; Path=/; HttpOnly; SameSite=Lax"
        );
    }

    #[tokio::test]
    async fn test_known_id_returns_same_session() {
        let store = SessionStore::new(60);
        let (id, first) = store.get_or_create(None).await;
        first.lock().await.reveal_suggestions();

        let (same_id, second) = store.get_or_create(Some(id)).await;
        assert_eq!(same_id, id);
        assert_eq!(second.lock().await.phase(), SessionPhase::SuggestionsShown);
        assert_eq!(store.sessions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_starts_fresh_session() {
        let store = SessionStore::new(60);
        let stale = Uuid::new_v4();
        let (id, handle) = store.get_or_create(Some(stale)).await;
        assert_ne!(id, stale);
        assert_eq!(handle.lock().await.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_pruned_on_creation() {
        let store = SessionStore::new(0);
        let (old_id, old) = store.get_or_create(None).await;
        old.lock().await.last_seen = Utc::now() - Duration::minutes(5);

        store.get_or_create(None).await;
        assert_eq!(store.sessions.read().await.len(), 1);
        assert!(!store.sessions.read().await.contains_key(&old_id));
    }
}
