//! Recognised syntax modes and editor themes.

use crate::error::{NotyError, Result};
use std::fmt;
use std::str::FromStr;

/// Language used for rendering when a tab has none, or an unsupported one.
pub const DEFAULT_LANGUAGE: &str = "plain_text";

/// Syntax modes bundled with the editor widget.
pub const LANGUAGES: &[&str] = &[
    "assembly_x86",
    "batchfile",
    "c_cpp",
    "clojure",
    "cmake",
    "csharp",
    "css",
    "dart",
    "diff",
    "dockerfile",
    "elixir",
    "elm",
    "erlang",
    "fsharp",
    "gitignore",
    "glsl",
    "golang",
    "graphqlschema",
    "haskell",
    "html",
    "ini",
    "java",
    "javascript",
    "json",
    "jsx",
    "julia",
    "kotlin",
    "latex",
    "less",
    "lua",
    "makefile",
    "markdown",
    "nix",
    "objectivec",
    "ocaml",
    "perl",
    "php",
    "plain_text",
    "powershell",
    "python",
    "r",
    "ruby",
    "rust",
    "scala",
    "scss",
    "sh",
    "sql",
    "svg",
    "swift",
    "toml",
    "tsx",
    "typescript",
    "vue",
    "xml",
    "yaml",
    "zig",
];

/// Theme used when the configured one is not recognised.
pub const DEFAULT_THEME: &str = "one_dark";

pub const THEMES: &[&str] = &["one_dark"];

/// A validated syntax mode name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language(&'static str);

impl Language {
    /// Looks `name` up in [`LANGUAGES`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for names outside the recognised set.
    pub fn parse(name: &str) -> Result<Self> {
        LANGUAGES
            .binary_search(&name)
            .map(|index| Self(LANGUAGES[index]))
            .map_err(|_| NotyError::validation(format!("unsupported language \"{}\"", name)))
    }

    pub fn plain_text() -> Self {
        Self(DEFAULT_LANGUAGE)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl FromStr for Language {
    type Err = NotyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Whether `theme` is one of [`THEMES`].
pub fn is_known_theme(theme: &str) -> bool {
    THEMES.contains(&theme)
}
