//! Access to the user's own files.

use crate::error::Result;
use async_trait::async_trait;

/// Reads and writes documents at user-chosen paths.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    async fn read(&self, path: &str) -> Result<String>;

    /// Replaces the file at `path` with `content`, creating it if needed.
    async fn write(&self, path: &str, content: &str) -> Result<()>;
}
