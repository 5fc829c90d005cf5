//! Session repository trait.

use super::model::Session;
use crate::error::Result;
use crate::identity::TabId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// A session decoded from storage together with its tabs' content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredSession {
    /// Records whose content was found, in display order.
    pub session: Session,
    /// Saved content per tab.
    pub contents: HashMap<TabId, String>,
    /// Records dropped because their content was missing.
    pub dropped: Vec<TabId>,
}

impl RestoredSession {
    /// Saved content of `id`; empty if none was stored.
    pub fn content(&self, id: TabId) -> &str {
        self.contents.get(&id).map(String::as_str).unwrap_or("")
    }
}

/// Outcome of loading the session document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLoad {
    /// No session was stored.
    Fresh,
    /// The document was malformed and was renamed to `moved_to`.
    Quarantined { moved_to: PathBuf, reason: String },
    Restored(RestoredSession),
}

impl SessionLoad {
    /// The restored session, if any.
    pub fn into_restored(self) -> Option<RestoredSession> {
        match self {
            Self::Restored(restored) => Some(restored),
            Self::Fresh | Self::Quarantined { .. } => None,
        }
    }
}

/// An abstract repository for the session document and per-tab side files.
///
/// Failures are returned to the caller; implementations never panic on I/O.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Replaces the stored session document.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Writes the content of tab `id` to its side file.
    async fn save_unsaved_content(&self, id: TabId, content: &str) -> Result<()>;

    /// Deletes the side file of tab `id`; a missing file is not an error.
    async fn remove_unsaved_content(&self, id: TabId) -> Result<()>;

    /// Loads the stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(SessionLoad::Fresh)`: Nothing stored yet
    /// - `Ok(SessionLoad::Quarantined { .. })`: The document was malformed and moved aside
    /// - `Ok(SessionLoad::Restored(_))`: The session, minus records without content
    /// - `Err(_)`: The document could not be read
    async fn load(&self) -> Result<SessionLoad>;
}
