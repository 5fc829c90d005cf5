//! Application layer for Noty.
//!
//! Coordinates the domain types of `noty-core` with the repositories and
//! front-end collaborators: tab lifecycle, autosave, keymap actions and
//! startup.

pub mod actions;
pub mod autosave;
pub mod bootstrap;
pub mod deferred;
pub mod workspace;

pub use actions::ActionOutcome;
pub use autosave::AutosaveTimer;
pub use bootstrap::Bootstrap;
pub use deferred::DeferredChecks;
pub use workspace::{CloseOutcome, Workspace};
