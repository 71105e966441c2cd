//! Session registry: maps session ids to independent conversations.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::SessionError;

use super::session::{IntakeSettings, Reply, Session, SessionStatus};

/// In-memory registry of intake sessions.
///
/// Each session sits behind its own mutex so that validate-then-commit is
/// atomic per session while different sessions proceed in parallel.
pub struct SessionRegistry {
    settings: Arc<IntakeSettings>,
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new(settings: IntakeSettings) -> Arc<Self> {
        Arc::new(Self {
            settings: Arc::new(settings),
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    /// Start a new session and return its id with the opening question.
    pub async fn create(&self) -> (Uuid, Reply) {
        let session = Session::new(Arc::clone(&self.settings));
        let id = session.id();
        let reply = session.welcome();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        info!(session_id = %id, variant = %self.settings.variant, "Intake session created");
        (id, reply)
    }

    /// Clear a session's answers and tally.
    pub async fn reset(&self, id: Uuid) -> Result<Reply, SessionError> {
        let session = self.get(id).await?;
        let mut session = session.lock().await;
        Ok(session.reset())
    }

    /// Feed an utterance to a session.
    pub async fn advance(&self, id: Uuid, utterance: &str) -> Result<Reply, SessionError> {
        let session = self.get(id).await?;
        let mut session = session.lock().await;
        session
            .advance(utterance)
            .map_err(|source| SessionError::Failed { id, source })
    }

    pub async fn status(&self, id: Uuid) -> Result<SessionStatus, SessionError> {
        let session = self.get(id).await?;
        let session = session.lock().await;
        Ok(session.status())
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session>>, SessionError> {
        let sessions = self.sessions.read().await;
        match sessions.get(&id) {
            Some(session) => Ok(Arc::clone(session)),
            None => {
                warn!(session_id = %id, "Unknown intake session");
                Err(SessionError::NotFound(id))
            }
        }
    }
}
