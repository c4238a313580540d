//! Single-line text input widget

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Single-line text input with a char-indexed cursor and horizontal
/// scrolling.
#[derive(Debug, Default)]
pub struct InputBox {
    content: String,
    /// Cursor position as a character index
    cursor: usize,
    /// Horizontal scroll offset in display columns
    scroll: usize,
    placeholder: String,
    focused: bool,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focus state
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Current content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Clear content and reset the cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of character index `idx`
    fn byte_at(&self, idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(idx)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Display columns taken by text before the cursor
    fn cursor_column(&self) -> usize {
        self.content
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    fn remove_char_at(&mut self, idx: usize) {
        let start = self.byte_at(idx);
        let end = self.byte_at(idx + 1);
        self.content.drain(start..end);
    }

    /// Apply an input action. Returns whether the widget consumed it.
    pub fn apply(&mut self, action: &Action, width: u16) -> bool {
        let consumed = match action {
            Action::Char(c) => {
                self.insert_char(*c);
                true
            }
            Action::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_char_at(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.cursor < self.char_count() {
                    self.remove_char_at(self.cursor);
                    true
                } else {
                    false
                }
            }
            Action::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::Right => {
                if self.cursor < self.char_count() {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            Action::Home => {
                self.cursor = 0;
                true
            }
            Action::End => {
                self.cursor = self.char_count();
                true
            }
            Action::ClearLine => {
                self.clear();
                true
            }
            Action::DeleteWord => {
                let chars: Vec<char> = self.content.chars().collect();
                let mut target = self.cursor;
                while target > 0 && chars[target - 1] == ' ' {
                    target -= 1;
                }
                while target > 0 && chars[target - 1] != ' ' {
                    target -= 1;
                }
                let start = self.byte_at(target);
                let end = self.byte_at(self.cursor);
                self.content.drain(start..end);
                self.cursor = target;
                true
            }
            Action::Paste(text) => {
                // Flatten pasted newlines for the single-line input
                for c in text.chars() {
                    match c {
                        '\n' | '\r' => {
                            if !self.content.ends_with(' ') && self.cursor > 0 {
                                self.insert_char(' ');
                            }
                        }
                        _ => self.insert_char(c),
                    }
                }
                true
            }
            _ => false,
        };

        if consumed {
            self.follow_cursor(width as usize);
        }
        consumed
    }

    /// Keep the cursor inside the visible window.
    fn follow_cursor(&mut self, width: usize) {
        let visible = width.saturating_sub(4);
        let col = self.cursor_column();
        if col < self.scroll {
            self.scroll = col;
        } else if visible > 0 && col >= self.scroll + visible {
            self.scroll = col - visible + 1;
        }
    }

    /// Render the input box
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.focused {
                theme.accent_style()
            } else {
                theme.border_style()
            });
        let inner = block.inner(area);
        block.render(area, buf);

        let (text, style) = if self.content.is_empty() {
            (self.placeholder.clone(), theme.dim_style())
        } else {
            let visible_width = inner.width as usize;
            let mut visible = String::new();
            let mut skipped = 0;
            let mut used = 0;
            for c in self.content.chars() {
                let w = c.width().unwrap_or(0);
                if skipped < self.scroll {
                    skipped += w;
                    continue;
                }
                if used + w > visible_width {
                    break;
                }
                visible.push(c);
                used += w;
            }
            (visible, theme.base_style())
        };

        Paragraph::new(text).style(style).render(inner, buf);

        if self.focused && inner.width > 0 {
            let cursor_x = self.cursor_column().saturating_sub(self.scroll);
            if cursor_x < inner.width as usize {
                let pos = (inner.x + cursor_x as u16, inner.y);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_style(Style::default().bg(theme.accent));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in s.chars() {
            input.apply(&Action::Char(c), 80);
        }
        input
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut input = typed("hello");
        assert_eq!(input.content(), "hello");
        input.apply(&Action::Backspace, 80);
        assert_eq!(input.content(), "hell");
    }

    #[test]
    fn test_cursor_movement_and_insert_mid_string() {
        let mut input = typed("hllo");
        input.apply(&Action::Home, 80);
        input.apply(&Action::Right, 80);
        input.apply(&Action::Char('e'), 80);
        assert_eq!(input.content(), "hello");
    }

    #[test]
    fn test_multibyte_chars_edit_cleanly() {
        let mut input = typed("héllo");
        input.apply(&Action::Home, 80);
        input.apply(&Action::Right, 80);
        input.apply(&Action::Right, 80);
        input.apply(&Action::Backspace, 80);
        assert_eq!(input.content(), "hllo");
    }

    #[test]
    fn test_delete_word() {
        let mut input = typed("dear diary today");
        input.apply(&Action::DeleteWord, 80);
        assert_eq!(input.content(), "dear diary ");
        input.apply(&Action::DeleteWord, 80);
        assert_eq!(input.content(), "dear ");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = typed("a");
        input.apply(&Action::Paste("b\r\nc".to_string()), 80);
        assert_eq!(input.content(), "ab c");
    }

    #[test]
    fn test_clear_line() {
        let mut input = typed("something");
        input.apply(&Action::ClearLine, 80);
        assert_eq!(input.content(), "");
    }
}
