//! Collaborators provided by the front end.
//!
//! The workspace drives these without knowing how they are presented.

use crate::identity::TabId;
use crate::tab::EditorBuffer;
use crate::title::TitleLabel;
use async_trait::async_trait;

/// Answer to the unsaved-changes confirmation shown when closing a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    Save,
    Discard,
    Cancel,
}

/// Modal dialogs.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Reports a recoverable failure to the user.
    fn show_error(&self, message: &str);

    /// Reports a broken invariant. The application exits afterwards.
    fn show_internal_error(&self, message: &str);

    /// Asks whether to save the changes of the tab labelled `label` before closing it.
    async fn confirm_unsaved_changes(&self, label: &str) -> CloseChoice;

    /// Asks for a destination path; `None` when the user cancels.
    async fn pick_save_path(&self, suggested: Option<&str>) -> Option<String>;
}

/// The visual tab strip and buffer factory.
pub trait TabRenderer: Send {
    /// Creates the editable buffer for a new tab.
    fn create_buffer(&mut self) -> Box<dyn EditorBuffer>;

    /// Adds the strip of tab `id` at `position`.
    fn insert_strip(&mut self, id: TabId, position: usize, label: &TitleLabel);

    fn remove_strip(&mut self, id: TabId);

    fn set_label(&mut self, id: TabId, label: &TitleLabel);

    fn set_active(&mut self, id: TabId, active: bool);

    /// Shows or hides the changed marker.
    fn set_changed(&mut self, id: TabId, changed: bool);
}
