//! Settings repository trait.

use super::model::Settings;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Outcome of loading the settings document.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsLoad {
    /// The document was read and decoded.
    Loaded(Settings),
    /// No document existed; defaults were written.
    Created(Settings),
    /// The document was malformed. It was renamed to `moved_to` and defaults
    /// were written in its place.
    Quarantined {
        settings: Settings,
        moved_to: PathBuf,
        reason: String,
    },
}

impl SettingsLoad {
    pub fn settings(&self) -> &Settings {
        match self {
            Self::Loaded(settings) | Self::Created(settings) => settings,
            Self::Quarantined { settings, .. } => settings,
        }
    }

    pub fn into_settings(self) -> Settings {
        match self {
            Self::Loaded(settings) | Self::Created(settings) => settings,
            Self::Quarantined { settings, .. } => settings,
        }
    }
}

/// Mutation applied by [`SettingsRepository::update`].
pub type SettingsUpdate = Box<dyn FnOnce(&mut Settings) + Send>;

/// An abstract repository for the settings document.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the settings, recovering from a missing or malformed document.
    ///
    /// # Returns
    ///
    /// - `Ok(SettingsLoad)`: Usable settings and how they were obtained
    /// - `Err(_)`: The document could not be read or the defaults not written
    async fn load(&self) -> Result<SettingsLoad>;

    /// Replaces the stored settings.
    async fn save(&self, settings: &Settings) -> Result<()>;

    /// Read-modify-write under an exclusive lock; returns the stored result.
    async fn update(&self, update: SettingsUpdate) -> Result<Settings>;
}
