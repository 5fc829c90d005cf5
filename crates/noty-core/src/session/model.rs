use crate::error::{NotyError, Result};
use crate::fingerprint::Fingerprint;
use crate::identity::TabId;
use crate::tab::CursorPosition;
use serde::{Deserialize, Serialize};

/// Metadata of one open tab, as persisted.
///
/// `language` is stored verbatim; it is validated only when a tab is built
/// from the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTab {
    pub id: TabId,
    pub path: Option<String>,
    pub language: Option<String>,
    pub original_content: Fingerprint,
    pub cursor_position: CursorPosition,
}

/// The session document.
///
/// # File Location
///
/// `~/.noty/session.json`, with tab content in `~/.noty/saved/<tab id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Index into `tabs` of the active tab.
    pub active_tab: Option<usize>,
    /// Ordered as displayed.
    pub tabs: Vec<SessionTab>,
}

impl Session {
    pub fn new(active_tab: Option<usize>, tabs: Vec<SessionTab>) -> Self {
        Self { active_tab, tabs }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The active record, if the stored index is in range.
    pub fn active(&self) -> Option<&SessionTab> {
        self.active_tab.and_then(|index| self.tabs.get(index))
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NotyError::internal(format!("Failed to encode session: {}", e)))
    }

    pub fn decode(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| NotyError::decode("session", e.to_string()))
    }
}
