//! File-system access to user documents.

use crate::storage::write_text_atomic;
use async_trait::async_trait;
use noty_core::document::DocumentRepository;
use noty_core::error::{NotyError, Result};
use std::path::PathBuf;

/// Reads and writes documents directly on the local file system.
#[derive(Debug, Clone, Default)]
pub struct FsDocumentRepository;

impl FsDocumentRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentRepository for FsDocumentRepository {
    async fn read(&self, path: &str) -> Result<String> {
        tokio::fs::read_to_string(path).await.map_err(|e| {
            NotyError::io(format!("Failed to read {}: {}", path, e))
        })
    }

    async fn write(&self, path: &str, content: &str) -> Result<()> {
        let target = PathBuf::from(path);
        let content = content.to_string();
        tokio::task::spawn_blocking(move || write_text_atomic(&target, &content))
            .await
            .map_err(|e| NotyError::internal(format!("Failed to join task: {}", e)))?
            .map_err(|e| NotyError::io(format!("Failed to write {}: {}", path, e)))
    }
}
