//! File-backed persistence for the session context

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::warn;

use super::SessionContext;
use crate::error::SessionError;

/// Session file name
const SESSION_FILE: &str = "session.json";

/// Persisted session shared across CLI invocations.
///
/// Writes are last-write-wins; there is no merge of concurrent updates.
pub struct SessionStore {
    session: Arc<RwLock<SessionContext>>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Load the session from `data_dir` or start signed out
    pub async fn load(data_dir: &Path) -> Result<Self, SessionError> {
        let file_path = data_dir.join(SESSION_FILE);

        let session = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .await
                .map_err(|e| SessionError::Storage(format!("failed to read session: {}", e)))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "discarding unreadable session file");
                SessionContext::anonymous()
            })
        } else {
            SessionContext::anonymous()
        };

        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of the current session
    pub async fn get(&self) -> SessionContext {
        self.session.read().await.clone()
    }

    /// Replace the session. Memory only changes once the file is written.
    pub async fn set(&self, session: SessionContext) -> Result<(), SessionError> {
        let mut current = self.session.write().await;
        self.persist(&session).await?;
        *current = session;
        Ok(())
    }

    /// Apply a fallible change and persist the result
    pub async fn update<F>(&self, change: F) -> Result<SessionContext, SessionError>
    where
        F: FnOnce(&mut SessionContext) -> Result<(), SessionError>,
    {
        let mut current = self.session.write().await;
        let mut next = current.clone();
        change(&mut next)?;
        self.persist(&next).await?;
        *current = next.clone();
        Ok(next)
    }

    /// Sign out and persist the empty session
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.set(SessionContext::anonymous()).await
    }

    async fn persist(&self, session: &SessionContext) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                SessionError::Storage(format!("failed to create data dir: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(session)
            .map_err(|e| SessionError::Storage(format!("failed to serialize session: {}", e)))?;

        fs::write(&self.file_path, content)
            .await
            .map_err(|e| SessionError::Storage(format!("failed to write session: {}", e)))?;

        Ok(())
    }
}
