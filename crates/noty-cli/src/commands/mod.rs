pub mod settings;
pub mod status;
pub mod tab;

use crate::frontend::{ConsoleDialogs, ConsoleRenderer};
use anyhow::{Context, Result};
use noty_application::{Bootstrap, Workspace};
use noty_core::identity::TabId;
use noty_infrastructure::{
    FsDocumentRepository, JsonSessionRepository, JsonSettingsRepository, NotyPaths,
};
use std::sync::Arc;

/// Wires the file-backed repositories with terminal dialogs.
pub fn bootstrap(paths: &NotyPaths, dialogs: ConsoleDialogs) -> Bootstrap {
    Bootstrap {
        settings: Arc::new(JsonSettingsRepository::new(paths)),
        sessions: Arc::new(JsonSessionRepository::new(paths.clone())),
        documents: Arc::new(FsDocumentRepository::new()),
        dialogs: Arc::new(dialogs),
    }
}

/// Restores the previous session.
pub async fn start(paths: &NotyPaths, dialogs: ConsoleDialogs) -> Result<Workspace> {
    bootstrap(paths, dialogs)
        .start(Box::new(ConsoleRenderer))
        .await
        .context("Failed to restore the workspace")
}

/// Flushes pending autosaves and writes the session back.
pub async fn finish(mut workspace: Workspace) -> Result<()> {
    workspace
        .prepare_exit()
        .await
        .context("Failed to persist the workspace")
}

pub fn require_tab(workspace: &Workspace, id: u64) -> Result<TabId> {
    let id = TabId::new(id);
    if workspace.tab(id).is_none() {
        anyhow::bail!("No open tab with id {}", id);
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use noty_core::ui::CloseChoice;
    use tempfile::TempDir;

    fn setup() -> (TempDir, NotyPaths) {
        crate::logging::test();
        let temp_dir = TempDir::new().unwrap();
        let paths = NotyPaths::at(temp_dir.path());
        paths.ensure_dirs().unwrap();
        (temp_dir, paths)
    }

    #[tokio::test]
    async fn test_tabs_survive_between_invocations() {
        let (_temp_dir, paths) = setup();

        let workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        assert_eq!(status::render(&workspace), "No open tabs\n");

        let mut workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        let id = workspace.create_tab(Some("markdown"), "# notes").await.unwrap();
        workspace
            .set_content(id, "# notes\n- milk", std::time::Instant::now())
            .unwrap();
        finish(workspace).await.unwrap();

        let workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        assert_eq!(require_tab(&workspace, id.get()).unwrap(), id);
        assert!(require_tab(&workspace, id.get() + 1).is_err());
        assert_eq!(workspace.tab(id).unwrap().content(), "# notes\n- milk");

        let listing = status::render(&workspace);
        assert!(listing.starts_with('*'));
        assert!(listing.contains("Untitled-1  [markdown]  (modified)"));
    }

    #[tokio::test]
    async fn test_close_without_choice_keeps_changed_tab() {
        let (_temp_dir, paths) = setup();
        let mut workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        let id = workspace.create_tab(None, "").await.unwrap();
        workspace
            .set_content(id, "unsaved", std::time::Instant::now())
            .unwrap();
        finish(workspace).await.unwrap();

        tab::close(&paths, id.get(), CloseChoice::Cancel).await.unwrap();
        let workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        assert_eq!(workspace.len(), 1);

        tab::close(&paths, id.get(), CloseChoice::Discard).await.unwrap();
        let workspace = start(&paths, ConsoleDialogs::new()).await.unwrap();
        assert!(workspace.is_empty());
        assert!(!paths.saved_file(id).exists());
    }

    #[tokio::test]
    async fn test_autosave_delay_is_persisted() {
        let (_temp_dir, paths) = setup();

        settings::set_autosave_delay(&paths, 1200).await.unwrap();

        let settings = bootstrap(&paths, ConsoleDialogs::new())
            .load_settings()
            .await
            .unwrap();
        assert_eq!(settings.auto_save_delay, 1200);
    }
}
