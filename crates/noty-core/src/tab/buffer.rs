use crate::language::DEFAULT_LANGUAGE;
use crate::settings::EditorSettings;
use serde::{Deserialize, Serialize};

/// Zero-based cursor location in a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub row: u32,
    pub column: u32,
}

impl CursorPosition {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// The embedded text-editing widget backing a tab.
///
/// The buffer owns the live text. Tabs read it on demand and never keep a
/// second copy.
pub trait EditorBuffer: Send {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    fn cursor(&self) -> CursorPosition;

    fn set_cursor(&mut self, position: CursorPosition);

    /// Switches syntax highlighting to the named mode.
    fn set_syntax_mode(&mut self, language: &str);

    fn focus(&mut self);

    fn apply_settings(&mut self, _settings: &EditorSettings) {}
}

/// A plain in-memory buffer, for headless front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: CursorPosition,
    syntax_mode: String,
    focused: bool,
    settings: Option<EditorSettings>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: CursorPosition::default(),
            syntax_mode: DEFAULT_LANGUAGE.to_string(),
            focused: false,
            settings: None,
        }
    }

    pub fn syntax_mode(&self) -> &str {
        &self.syntax_mode
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn settings(&self) -> Option<&EditorSettings> {
        self.settings.as_ref()
    }

    /// Clamps `position` to an existing line and column of the text.
    fn clamp(&self, position: CursorPosition) -> CursorPosition {
        let lines: Vec<&str> = self.text.split('\n').collect();
        let row = (position.row as usize).min(lines.len() - 1);
        let width = lines[row].chars().count();
        CursorPosition {
            row: row as u32,
            column: (position.column as usize).min(width) as u32,
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuffer for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.clamp(self.cursor);
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn set_cursor(&mut self, position: CursorPosition) {
        self.cursor = self.clamp(position);
    }

    fn set_syntax_mode(&mut self, language: &str) {
        self.syntax_mode = language.to_string();
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn apply_settings(&mut self, settings: &EditorSettings) {
        self.settings = Some(settings.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_clamped_to_text() {
        let mut buffer = TextBuffer::new();
        buffer.set_text("ab\ncdef");

        buffer.set_cursor(CursorPosition::new(1, 3));
        assert_eq!(buffer.cursor(), CursorPosition::new(1, 3));

        buffer.set_cursor(CursorPosition::new(9, 9));
        assert_eq!(buffer.cursor(), CursorPosition::new(1, 4));

        buffer.set_text("x");
        assert_eq!(buffer.cursor(), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_defaults_to_plain_text_mode() {
        assert_eq!(TextBuffer::new().syntax_mode(), "plain_text");
    }
}
