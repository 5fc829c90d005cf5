//! User configuration: autosave delay, editor appearance and keymaps.

mod keymap;
mod model;
mod repository;

pub use keymap::{Action, KeyStroke, KeymapEntry};
pub use model::{EditorSettings, Settings};
pub use repository::{SettingsLoad, SettingsRepository, SettingsUpdate};
