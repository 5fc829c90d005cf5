//! JSON-file implementation of the session repository.

use crate::paths::NotyPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile, remove_if_exists, write_text_atomic};
use async_trait::async_trait;
use noty_core::error::{NotyError, Result};
use noty_core::identity::TabId;
use noty_core::session::{RestoredSession, Session, SessionLoad, SessionRepository};
use std::collections::HashMap;

/// Stores the session in `session.json` and tab content in `saved/<tab id>`.
///
/// All file operations run on the blocking thread pool.
#[derive(Debug, Clone)]
pub struct JsonSessionRepository {
    paths: NotyPaths,
}

impl JsonSessionRepository {
    pub fn new(paths: NotyPaths) -> Self {
        Self { paths }
    }

    fn load_blocking(paths: &NotyPaths) -> Result<SessionLoad> {
        let file = AtomicJsonFile::<Session>::new(paths.session_file());

        let session = match file.load() {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!("No session stored at {}", file.path().display());
                return Ok(SessionLoad::Fresh);
            }
            Err(AtomicJsonError::ParseError(e)) => {
                let moved_to = file.quarantine()?;
                return Ok(SessionLoad::Quarantined {
                    moved_to,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        Ok(SessionLoad::Restored(Self::attach_contents(paths, session)))
    }

    /// Reads each record's side file, dropping records whose content is unreadable.
    fn attach_contents(paths: &NotyPaths, session: Session) -> RestoredSession {
        let Session { active_tab, tabs } = session;
        let active_id = active_tab.and_then(|index| tabs.get(index)).map(|record| record.id);

        let mut kept = Vec::with_capacity(tabs.len());
        let mut contents = HashMap::with_capacity(tabs.len());
        let mut dropped = Vec::new();

        for record in tabs {
            match std::fs::read_to_string(paths.saved_file(record.id)) {
                Ok(content) => {
                    contents.insert(record.id, content);
                    kept.push(record);
                }
                Err(e) => {
                    tracing::warn!(
                        "Dropping tab {} from session, its saved content is unavailable: {}",
                        record.id,
                        e
                    );
                    dropped.push(record.id);
                }
            }
        }

        // Re-point the active index at the same record; an out-of-range index is kept as is
        let active = match active_id {
            Some(id) => kept.iter().position(|record| record.id == id),
            None => active_tab,
        };

        RestoredSession {
            session: Session::new(active, kept),
            contents,
            dropped,
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| NotyError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn save(&self, session: &Session) -> Result<()> {
        let file = AtomicJsonFile::<Session>::new(self.paths.session_file());
        let session = session.clone();
        run_blocking(move || {
            file.save(&session).map_err(|e| {
                tracing::error!("Failed to save session: {}", e);
                NotyError::from(e)
            })
        })
        .await
    }

    async fn save_unsaved_content(&self, id: TabId, content: &str) -> Result<()> {
        let path = self.paths.saved_file(id);
        let content = content.to_string();
        run_blocking(move || {
            write_text_atomic(&path, &content).map_err(|e| {
                tracing::error!("Failed to save content of tab {}: {}", id, e);
                NotyError::from(e)
            })
        })
        .await
    }

    async fn remove_unsaved_content(&self, id: TabId) -> Result<()> {
        let path = self.paths.saved_file(id);
        run_blocking(move || remove_if_exists(&path).map_err(NotyError::from)).await
    }

    async fn load(&self) -> Result<SessionLoad> {
        let paths = self.paths.clone();
        run_blocking(move || Self::load_blocking(&paths)).await
    }
}
