use crate::error::{NotyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named actions a key binding can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    PreviousTab,
    NextTab,
    SaveTab,
    SaveTabAs,
    CloseTab,
    CloseAllTabs,
    CreateTab,
    ToggleLanguagesSelector,
    Reload,
    Exit,
    ExitCompletely,
    ToggleDevTools,
}

impl Action {
    pub const ALL: [Action; 12] = [
        Action::PreviousTab,
        Action::NextTab,
        Action::SaveTab,
        Action::SaveTabAs,
        Action::CloseTab,
        Action::CloseAllTabs,
        Action::CreateTab,
        Action::ToggleLanguagesSelector,
        Action::Reload,
        Action::Exit,
        Action::ExitCompletely,
        Action::ToggleDevTools,
    ];

    /// Name used in the settings document.
    pub fn name(self) -> &'static str {
        match self {
            Action::PreviousTab => "previousTab",
            Action::NextTab => "nextTab",
            Action::SaveTab => "saveTab",
            Action::SaveTabAs => "saveTabAs",
            Action::CloseTab => "closeTab",
            Action::CloseAllTabs => "closeAllTabs",
            Action::CreateTab => "createTab",
            Action::ToggleLanguagesSelector => "toggleLanguagesSelector",
            Action::Reload => "reload",
            Action::Exit => "exit",
            Action::ExitCompletely => "exitCompletely",
            Action::ToggleDevTools => "toggleDevTools",
        }
    }
}

impl FromStr for Action {
    type Err = NotyError;

    fn from_str(s: &str) -> Result<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| NotyError::validation(format!("unknown action \"{}\"", s)))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key press as reported by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyStroke {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: String,
}

impl KeyStroke {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// One key binding of the settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<bool>,
    pub key: String,
    pub action: Action,
}

impl KeymapEntry {
    pub fn new(ctrl: bool, shift: bool, alt: bool, key: &str, action: Action) -> Self {
        Self {
            ctrl: Some(ctrl),
            shift: Some(shift),
            alt: Some(alt),
            key: key.to_string(),
            action,
        }
    }

    /// Absent modifier flags mean "not pressed"; keys compare case-insensitively.
    pub fn matches(&self, stroke: &KeyStroke) -> bool {
        self.ctrl.unwrap_or(false) == stroke.ctrl
            && self.shift.unwrap_or(false) == stroke.shift
            && self.alt.unwrap_or(false) == stroke.alt
            && self.key.to_lowercase() == stroke.key.to_lowercase()
    }
}
