//! Path management for the Noty data directory.
//!
//! Every file Noty writes lives under a single data directory, `~/.noty` by
//! default.

use std::path::{Path, PathBuf};

/// Name of the default data directory under the home directory.
pub const DATA_DIR_NAME: &str = ".noty";

/// Prefix given to a malformed document when it is moved aside.
pub const INVALIDATED_PREFIX: &str = "_INVALIDATED_.";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Locations of Noty's files.
///
/// # Directory Structure
///
/// ```text
/// ~/.noty/
/// ├── settings.json            # User settings
/// ├── session.json             # Open tabs and the active one
/// ├── saved/                   # Unsaved content, one file per tab id
/// │   └── <tab id>
/// └── logs/                    # Application logs
///     └── noty.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotyPaths {
    root: PathBuf,
}

impl NotyPaths {
    /// Resolves the data directory.
    ///
    /// # Arguments
    ///
    /// * `custom_root` - Overrides the default `~/.noty` location
    ///
    /// # Returns
    ///
    /// - `Ok(NotyPaths)`: Resolved paths; nothing is created on disk
    /// - `Err(PathError::HomeDirNotFound)`: No override and no home directory
    pub fn new(custom_root: Option<PathBuf>) -> Result<Self, PathError> {
        let root = match custom_root {
            Some(root) => root,
            None => dirs::home_dir()
                .ok_or(PathError::HomeDirNotFound)?
                .join(DATA_DIR_NAME),
        };
        Ok(Self { root })
    }

    /// Paths rooted at `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    /// Directory of per-tab content side files.
    pub fn saved_dir(&self) -> PathBuf {
        self.root.join("saved")
    }

    pub fn saved_file(&self, id: impl std::fmt::Display) -> PathBuf {
        self.saved_dir().join(id.to_string())
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Creates the data directory and its `saved/` subdirectory.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.saved_dir())
    }
}

/// Sibling path a malformed document at `path` is renamed to.
pub fn invalidated_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}", INVALIDATED_PREFIX, name))
}
