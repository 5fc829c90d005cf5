//! Terminal stand-ins for the dialogs and the tab strip.

use async_trait::async_trait;
use noty_core::identity::TabId;
use noty_core::tab::{EditorBuffer, TextBuffer};
use noty_core::title::TitleLabel;
use noty_core::ui::{CloseChoice, DialogService, TabRenderer};

/// Dialogs answered up front from command-line flags.
pub struct ConsoleDialogs {
    close_choice: CloseChoice,
    save_path: Option<String>,
}

impl ConsoleDialogs {
    /// Declines every confirmation and every save prompt.
    pub fn new() -> Self {
        Self {
            close_choice: CloseChoice::Cancel,
            save_path: None,
        }
    }

    pub fn with_close_choice(mut self, choice: CloseChoice) -> Self {
        self.close_choice = choice;
        self
    }

    pub fn with_save_path(mut self, path: Option<String>) -> Self {
        self.save_path = path;
        self
    }
}

impl Default for ConsoleDialogs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DialogService for ConsoleDialogs {
    fn show_error(&self, message: &str) {
        tracing::warn!("{}", message);
        eprintln!("Error: {}", message);
    }

    fn show_internal_error(&self, message: &str) {
        tracing::error!("{}", message);
        eprintln!("Internal error: {}", message);
    }

    async fn confirm_unsaved_changes(&self, label: &str) -> CloseChoice {
        let answer = match self.close_choice {
            CloseChoice::Save => "saving",
            CloseChoice::Discard => "discarding changes",
            CloseChoice::Cancel => "keeping it open (pass --save or --discard)",
        };
        eprintln!("{} has unsaved changes, {}", label, answer);
        self.close_choice
    }

    async fn pick_save_path(&self, suggested: Option<&str>) -> Option<String> {
        tracing::debug!("Save path requested, suggested: {:?}", suggested);
        self.save_path.clone()
    }
}

/// Logs tab strip updates; buffers are plain in-memory text.
#[derive(Default)]
pub struct ConsoleRenderer;

impl TabRenderer for ConsoleRenderer {
    fn create_buffer(&mut self) -> Box<dyn EditorBuffer> {
        Box::new(TextBuffer::new())
    }

    fn insert_strip(&mut self, id: TabId, position: usize, label: &TitleLabel) {
        tracing::debug!("Tab {} inserted at {} as {}", id, position, label.text);
    }

    fn remove_strip(&mut self, id: TabId) {
        tracing::debug!("Tab {} removed", id);
    }

    fn set_label(&mut self, id: TabId, label: &TitleLabel) {
        tracing::debug!("Tab {} relabelled {}", id, label.text);
    }

    fn set_active(&mut self, id: TabId, active: bool) {
        tracing::trace!("Tab {} active: {}", id, active);
    }

    fn set_changed(&mut self, id: TabId, changed: bool) {
        tracing::trace!("Tab {} changed: {}", id, changed);
    }
}
