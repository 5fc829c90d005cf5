//! JSON-file implementation of the settings repository.

use crate::paths::NotyPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile};
use async_trait::async_trait;
use noty_core::error::{NotyError, Result};
use noty_core::settings::{Settings, SettingsLoad, SettingsRepository, SettingsUpdate};
use std::path::PathBuf;

/// Stores settings in `settings.json`.
///
/// A missing or malformed document is replaced with the defaults, which are
/// written back immediately.
#[derive(Debug, Clone)]
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(paths: &NotyPaths) -> Self {
        Self {
            path: paths.settings_file(),
        }
    }

    fn file(&self) -> AtomicJsonFile<Settings> {
        AtomicJsonFile::new(self.path.clone())
    }

    fn load_blocking(file: &AtomicJsonFile<Settings>) -> Result<SettingsLoad> {
        match file.load() {
            Ok(Some(settings)) => Ok(SettingsLoad::Loaded(settings)),
            Ok(None) => {
                let settings = Settings::default();
                file.save(&settings)?;
                tracing::info!("Created default settings at {}", file.path().display());
                Ok(SettingsLoad::Created(settings))
            }
            Err(AtomicJsonError::ParseError(e)) => {
                let moved_to = file.quarantine()?;
                let settings = Settings::default();
                file.save(&settings)?;
                Ok(SettingsLoad::Quarantined {
                    settings,
                    moved_to,
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsRepository {
    async fn load(&self) -> Result<SettingsLoad> {
        let file = self.file();
        tokio::task::spawn_blocking(move || Self::load_blocking(&file))
            .await
            .map_err(|e| NotyError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let file = self.file();
        let settings = settings.clone();
        tokio::task::spawn_blocking(move || file.save(&settings).map_err(NotyError::from))
            .await
            .map_err(|e| NotyError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn update(&self, update: SettingsUpdate) -> Result<Settings> {
        let file = self.file();
        tokio::task::spawn_blocking(move || {
            let mut update = Some(update);
            let mut apply = |settings: &mut Settings| -> std::result::Result<(), AtomicJsonError> {
                if let Some(update) = update.take() {
                    update(settings);
                }
                Ok(())
            };

            match file.update(Settings::default(), &mut apply) {
                Err(AtomicJsonError::ParseError(e)) => {
                    tracing::warn!("Settings file is malformed, updating defaults instead: {}", e);
                    file.quarantine()?;
                    Ok(file.update(Settings::default(), &mut apply)?)
                }
                other => Ok(other?),
            }
        })
        .await
        .map_err(|e| NotyError::internal(format!("Failed to join task: {}", e)))?
    }
}
