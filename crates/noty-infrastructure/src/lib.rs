//! File-system implementations of the Noty repositories.

pub mod fs_document_repository;
pub mod json_session_repository;
pub mod json_settings_repository;
pub mod paths;
pub mod storage;

pub use crate::fs_document_repository::FsDocumentRepository;
pub use crate::json_session_repository::JsonSessionRepository;
pub use crate::json_settings_repository::JsonSettingsRepository;
pub use crate::paths::{NotyPaths, PathError};
