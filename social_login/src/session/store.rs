use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::errors::SessionError;

const SESSION_PREFIX: &str = "session";

/// What a session id resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Output of the user serializer
    pub user_key: String,
    pub expires_at: DateTime<Utc>,
    pub ttl: u64,
}

impl StoredSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Backend holding login sessions.
///
/// Applications with more than one server instance supply their own
/// implementation; [`InMemorySessionStore`] suits a single process.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    async fn put(&self, session_id: &str, session: StoredSession) -> Result<(), SessionError>;

    /// Expired sessions are reported as absent.
    async fn get(&self, session_id: &str) -> Result<Option<StoredSession>, SessionError>;

    async fn remove(&self, session_id: &str) -> Result<(), SessionError>;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    entry: Mutex<HashMap<String, StoredSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self::default()
    }

    fn make_key(session_id: &str) -> String {
        format!("{SESSION_PREFIX}:{session_id}")
    }

    pub async fn len(&self) -> usize {
        self.entry.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entry.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session_id: &str, session: StoredSession) -> Result<(), SessionError> {
        let key = Self::make_key(session_id);
        let mut entry = self.entry.lock().await;
        entry.retain(|_, stored| !stored.is_expired());
        entry.insert(key, session);
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<StoredSession>, SessionError> {
        let key = Self::make_key(session_id);
        let mut entry = self.entry.lock().await;
        match entry.get(&key) {
            Some(session) if session.is_expired() => {
                tracing::debug!("Evicting expired session");
                entry.remove(&key);
                Ok(None)
            }
            Some(session) => Ok(Some(session.clone())),
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        let key = Self::make_key(session_id);
        self.entry.lock().await.remove(&key);
        Ok(())
    }
}
