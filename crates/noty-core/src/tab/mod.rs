//! Tab domain module.
//!
//! A tab is one open document: its identity, path binding, language, the
//! fingerprint of its last saved content, and the editable buffer showing it.
//!
//! # Module Structure
//!
//! - `buffer`: The editable-buffer capability (`EditorBuffer`) and `TextBuffer`
//! - `event`: Notifications emitted by tabs (`TabEvent`)
//! - `model`: The tab entity and its lifecycle (`Tab`, `TabState`)

mod buffer;
mod event;
mod model;

pub use buffer::{CursorPosition, EditorBuffer, TextBuffer};
pub use event::TabEvent;
pub use model::{ClosedTab, ClosingFrom, Registries, Tab, TabParams, TabState};
