//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe access to the JSON documents under the data
//! directory, plus plain-text helpers for per-tab side files.

use crate::paths::invalidated_path;
use noty_core::error::NotyError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// The document is not valid JSON for the target type.
    ParseError(serde_json::Error),
    /// JSON serialization error.
    SerializeError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl AtomicJsonError {
    pub fn is_parse(&self) -> bool {
        matches!(self, AtomicJsonError::ParseError(_))
    }
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            AtomicJsonError::SerializeError(e) => write!(f, "JSON serialization error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<AtomicJsonError> for NotyError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::IoError(e) => NotyError::from(e),
            AtomicJsonError::ParseError(e) => NotyError::decode("JSON", e.to_string()),
            AtomicJsonError::SerializeError(e) => {
                NotyError::internal(format!("Failed to serialize document: {}", e))
            }
            AtomicJsonError::LockError(e) => NotyError::io(e),
        }
    }
}

/// A handle to a JSON document written atomically.
///
/// Provides:
/// - **Atomicity**: Writes go to a temporary sibling that is renamed over the target
/// - **Isolation**: `update` holds an exclusive file lock across read-modify-write
/// - **Durability**: Explicit fsync before rename
/// - **Recovery**: A malformed document can be moved aside with [`AtomicJsonFile::quarantine`]
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err(AtomicJsonError::ParseError(_))`: The file is malformed or not UTF-8
    /// - `Err(_)`: Failed to read the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        // Bytes that are not UTF-8 surface as a parse error, not an I/O error
        let content = fs::read(&self.path)?;

        if content.trim_ascii().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_slice(&content).map_err(AtomicJsonError::ParseError)?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically as pretty-printed JSON.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let json = serde_json::to_string_pretty(data).map_err(AtomicJsonError::SerializeError)?;
        write_text_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Performs a transactional update with file locking.
    ///
    /// # Arguments
    ///
    /// * `default_value` - Value to update if the file doesn't exist
    /// * `f` - Update function that modifies the data
    ///
    /// # Returns
    ///
    /// - `Ok(T)`: The data as written
    /// - `Err`: Failed to acquire the lock, read, update, or write
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicJsonError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicJsonError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;

        Ok(data)
    }

    /// Renames the document to its invalidated sibling, replacing any earlier one.
    ///
    /// # Returns
    ///
    /// The path the document now lives at.
    pub fn quarantine(&self) -> Result<PathBuf, AtomicJsonError> {
        let target = invalidated_path(&self.path);
        fs::rename(&self.path, &target)?;
        tracing::warn!(
            "Moved malformed file {} to {}",
            self.path.display(),
            target.display()
        );
        Ok(target)
    }
}

/// Writes `content` to `path` through a temporary sibling and an atomic rename.
///
/// Missing parent directories are created.
pub fn write_text_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content.as_bytes())?;

    // Ensure data is written to disk
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)
}

/// Removes `path`; a missing file is not an error.
pub fn remove_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn temp_path(path: &Path) -> std::io::Result<PathBuf> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
    })?;

    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e))
            })?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the handle is dropped; removal is best effort
        let _ = fs::remove_file(&self.lock_path);
    }
}
