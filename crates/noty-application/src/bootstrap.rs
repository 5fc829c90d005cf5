//! Application startup: settings, session restore and the workspace.

use crate::workspace::Workspace;
use anyhow::{Context, Result};
use noty_core::document::DocumentRepository;
use noty_core::session::{SessionLoad, SessionRepository};
use noty_core::settings::{Settings, SettingsLoad, SettingsRepository};
use noty_core::ui::{DialogService, TabRenderer};
use std::sync::Arc;

/// The collaborators a workspace is started with.
#[derive(Clone)]
pub struct Bootstrap {
    pub settings: Arc<dyn SettingsRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub dialogs: Arc<dyn DialogService>,
}

impl Bootstrap {
    /// Loads the settings, telling the user if they had to be reset.
    pub async fn load_settings(&self) -> Result<Settings> {
        tracing::info!("[Bootstrap] Loading settings");
        let load = self
            .settings
            .load()
            .await
            .context("Failed to load settings")?;

        match load {
            SettingsLoad::Loaded(settings) => Ok(settings),
            SettingsLoad::Created(settings) => {
                tracing::info!("[Bootstrap] Created default settings");
                Ok(settings)
            }
            SettingsLoad::Quarantined {
                settings,
                moved_to,
                reason,
            } => {
                tracing::warn!(
                    "[Bootstrap] Settings reset to defaults, previous file kept at {}",
                    moved_to.display()
                );
                self.dialogs.show_error(&format!(
                    "Failed to decode settings file, falling back to default settings instead.\nReason:\n{}",
                    reason
                ));
                Ok(settings)
            }
        }
    }

    /// Loads settings and restores the previous session into a new workspace.
    pub async fn start(&self, renderer: Box<dyn TabRenderer>) -> Result<Workspace> {
        let settings = self.load_settings().await?;

        let mut workspace = Workspace::new(
            settings,
            self.sessions.clone(),
            self.documents.clone(),
            self.dialogs.clone(),
            renderer,
        );

        tracing::info!("[Bootstrap] Restoring session");
        let load = match self.sessions.load().await {
            Ok(load) => load,
            Err(e) => {
                self.dialogs
                    .show_error(&format!("Failed to load session:\n> {}", e));
                return Err(e).context("Failed to load session");
            }
        };

        match load {
            SessionLoad::Fresh => tracing::info!("[Bootstrap] No previous session"),
            SessionLoad::Quarantined { moved_to, reason } => {
                tracing::warn!(
                    "[Bootstrap] Session discarded, previous file kept at {}",
                    moved_to.display()
                );
                self.dialogs.show_error(&format!(
                    "Cannot recover invalid session, creating empty session instead.\nReason:\n{}",
                    reason
                ));
            }
            SessionLoad::Restored(restored) => {
                for id in &restored.dropped {
                    tracing::warn!("[Bootstrap] Tab {} could not be restored", id);
                    self.dialogs.show_error(&format!(
                        "Session references tab with ID {} but saved file does not exist.\nRemoving this tab instead.",
                        id
                    ));
                }
                workspace
                    .restore(restored)
                    .await
                    .context("Failed to restore session")?;
            }
        }

        tracing::info!("[Bootstrap] Workspace ready with {} tab(s)", workspace.len());
        Ok(workspace)
    }
}
