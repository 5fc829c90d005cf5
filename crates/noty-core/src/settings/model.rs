use super::keymap::{Action, KeyStroke, KeymapEntry};
use crate::error::{NotyError, Result};
use crate::language::{DEFAULT_THEME, is_known_theme};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Editor appearance preferences applied to every tab's buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    pub font_family: String,
    pub font_size: u32,
    pub tab_size: u32,
    pub theme: String,
    pub show_print_margin: bool,
}

impl EditorSettings {
    /// Theme to render with; unknown themes fall back to the default one.
    ///
    /// The stored value is left as configured.
    pub fn effective_theme(&self) -> &str {
        if is_known_theme(&self.theme) {
            &self.theme
        } else {
            DEFAULT_THEME
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            font_family: "\"Fira Code\"".to_string(),
            font_size: 16,
            tab_size: 4,
            theme: DEFAULT_THEME.to_string(),
            show_print_margin: false,
        }
    }
}

/// The settings document.
///
/// # File Location
///
/// `~/.noty/settings.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Debounce window for content autosave, in milliseconds.
    pub auto_save_delay: u64,
    pub editor: EditorSettings,
    /// Ordered; the first matching binding wins.
    pub keymaps: Vec<KeymapEntry>,
}

impl Settings {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.auto_save_delay)
    }

    /// Action bound to `stroke`, if any.
    pub fn resolve_action(&self, stroke: &KeyStroke) -> Option<Action> {
        self.keymaps
            .iter()
            .find(|entry| entry.matches(stroke))
            .map(|entry| entry.action)
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| NotyError::internal(format!("Failed to encode settings: {}", e)))
    }

    /// Parses a settings document. Unknown action names are rejected.
    pub fn decode(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| NotyError::decode("settings", e.to_string()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        use Action::*;

        Self {
            auto_save_delay: 500,
            editor: EditorSettings::default(),
            keymaps: vec![
                KeymapEntry::new(true, true, false, "Tab", PreviousTab),
                KeymapEntry::new(true, false, false, "Tab", NextTab),
                KeymapEntry::new(true, false, false, "s", SaveTab),
                KeymapEntry::new(true, true, false, "s", SaveTabAs),
                KeymapEntry::new(true, false, false, "w", CloseTab),
                KeymapEntry::new(true, true, false, "w", CloseAllTabs),
                KeymapEntry::new(true, false, false, "n", CreateTab),
                KeymapEntry::new(true, false, false, "L", ToggleLanguagesSelector),
                KeymapEntry::new(true, false, true, "r", Reload),
                KeymapEntry::new(true, false, false, "q", Exit),
                KeymapEntry::new(true, true, false, "Q", ExitCompletely),
                KeymapEntry::new(false, false, false, "F12", ToggleDevTools),
            ],
        }
    }
}
