//! Domain core of the Noty editor: tabs, their identity and titles, content
//! fingerprints, and the session and settings documents.

pub mod document;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod language;
pub mod session;
pub mod settings;
pub mod tab;
pub mod title;
pub mod ui;

// Re-export common error type
pub use error::{NotyError, Result};
