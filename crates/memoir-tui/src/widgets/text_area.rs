//! Multiline editor widget for the journal draft

use crate::input::Action;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Multiline text editor with a (line, column) cursor.
///
/// Columns are character indices, not bytes. Enter inserts a newline; the
/// surrounding view decides what submits the draft.
#[derive(Debug)]
pub struct TextArea {
    lines: Vec<String>,
    /// Cursor line index
    line: usize,
    /// Cursor column as a character index into the line
    col: usize,
    /// First visible line
    scroll: usize,
    placeholder: String,
    focused: bool,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            line: 0,
            col: 0,
            scroll: 0,
            placeholder: String::new(),
            focused: false,
        }
    }
}

impl TextArea {
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

    /// The draft as a single newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Whether the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Reset to an empty draft.
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.line = 0;
        self.col = 0;
        self.scroll = 0;
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.line].chars().count()
    }

    fn byte_at(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn insert_char(&mut self, c: char) {
        let at = Self::byte_at(&self.lines[self.line], self.col);
        self.lines[self.line].insert(at, c);
        self.col += 1;
    }

    fn insert_newline(&mut self) {
        let at = Self::byte_at(&self.lines[self.line], self.col);
        let rest = self.lines[self.line].split_off(at);
        self.lines.insert(self.line + 1, rest);
        self.line += 1;
        self.col = 0;
    }

    /// Apply an input action. Returns whether the widget consumed it.
    pub fn apply(&mut self, action: &Action, height: u16) -> bool {
        let consumed = match action {
            Action::Char(c) => {
                self.insert_char(*c);
                true
            }
            Action::Submit => {
                self.insert_newline();
                true
            }
            Action::Backspace => {
                if self.col > 0 {
                    self.col -= 1;
                    let start = Self::byte_at(&self.lines[self.line], self.col);
                    let end = Self::byte_at(&self.lines[self.line], self.col + 1);
                    self.lines[self.line].drain(start..end);
                    true
                } else if self.line > 0 {
                    // Join with the previous line
                    let removed = self.lines.remove(self.line);
                    self.line -= 1;
                    self.col = self.current_line_len();
                    self.lines[self.line].push_str(&removed);
                    true
                } else {
                    false
                }
            }
            Action::Delete => {
                if self.col < self.current_line_len() {
                    let start = Self::byte_at(&self.lines[self.line], self.col);
                    let end = Self::byte_at(&self.lines[self.line], self.col + 1);
                    self.lines[self.line].drain(start..end);
                    true
                } else if self.line + 1 < self.lines.len() {
                    let next = self.lines.remove(self.line + 1);
                    self.lines[self.line].push_str(&next);
                    true
                } else {
                    false
                }
            }
            Action::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.line > 0 {
                    self.line -= 1;
                    self.col = self.current_line_len();
                }
                true
            }
            Action::Right => {
                if self.col < self.current_line_len() {
                    self.col += 1;
                } else if self.line + 1 < self.lines.len() {
                    self.line += 1;
                    self.col = 0;
                }
                true
            }
            Action::Up => {
                if self.line > 0 {
                    self.line -= 1;
                    self.col = self.col.min(self.current_line_len());
                }
                true
            }
            Action::Down => {
                if self.line + 1 < self.lines.len() {
                    self.line += 1;
                    self.col = self.col.min(self.current_line_len());
                }
                true
            }
            Action::Home => {
                self.col = 0;
                true
            }
            Action::End => {
                self.col = self.current_line_len();
                true
            }
            Action::ClearLine => {
                self.lines[self.line].clear();
                self.col = 0;
                true
            }
            Action::Paste(text) => {
                for c in text.chars() {
                    match c {
                        '\n' => self.insert_newline(),
                        '\r' => {}
                        _ => self.insert_char(c),
                    }
                }
                true
            }
            _ => false,
        };

        if consumed {
            self.follow_cursor(height as usize);
        }
        consumed
    }

    /// Keep the cursor line inside the visible window.
    fn follow_cursor(&mut self, height: usize) {
        let visible = height.saturating_sub(2);
        if visible == 0 {
            return;
        }
        if self.line < self.scroll {
            self.scroll = self.line;
        } else if self.line >= self.scroll + visible {
            self.scroll = self.line - visible + 1;
        }
    }

    fn cursor_column(&self) -> usize {
        self.lines[self.line]
            .chars()
            .take(self.col)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    /// Render the text area
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

        if self.is_empty() && !self.placeholder.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(theme.dim_style())
                .render(inner, buf);
        } else {
            let visible: Vec<Line> = self
                .lines
                .iter()
                .skip(self.scroll)
                .take(inner.height as usize)
                .map(|l| Line::from(l.clone()))
                .collect();
            Paragraph::new(visible)
                .style(theme.base_style())
                .render(inner, buf);
        }

        if self.focused && inner.width > 0 && inner.height > 0 {
            let cursor_y = self.line.saturating_sub(self.scroll);
            let cursor_x = self.cursor_column();
            if cursor_y < inner.height as usize && cursor_x < inner.width as usize {
                let pos = (inner.x + cursor_x as u16, inner.y + cursor_y as u16);
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

    fn typed(s: &str) -> TextArea {
        let mut area = TextArea::new();
        for c in s.chars() {
            if c == '\n' {
                area.apply(&Action::Submit, 20);
            } else {
                area.apply(&Action::Char(c), 20);
            }
        }
        area
    }

    #[test]
    fn test_enter_inserts_newline() {
        let area = typed("dear diary\ntoday was fine");
        assert_eq!(area.text(), "dear diary\ntoday was fine");
        assert!(!area.is_empty());
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut area = typed("ab\ncd");
        area.apply(&Action::Home, 20);
        area.apply(&Action::Backspace, 20);
        assert_eq!(area.text(), "abcd");
    }

    #[test]
    fn test_delete_at_line_end_joins_next() {
        let mut area = typed("ab\ncd");
        area.apply(&Action::Up, 20);
        area.apply(&Action::End, 20);
        area.apply(&Action::Delete, 20);
        assert_eq!(area.text(), "abcd");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let mut area = typed("long first line\nhi");
        // Cursor is at the end of "hi" (col 2); moving up keeps col 2
        area.apply(&Action::Up, 20);
        area.apply(&Action::Char('X'), 20);
        assert_eq!(area.text(), "loXng first line\nhi");
    }

    #[test]
    fn test_paste_multiline() {
        let mut area = TextArea::new();
        area.apply(&Action::Paste("one\r\ntwo".to_string()), 20);
        assert_eq!(area.text(), "one\ntwo");
    }

    #[test]
    fn test_clear_resets_draft() {
        let mut area = typed("something\nelse");
        area.clear();
        assert!(area.is_empty());
        assert_eq!(area.text(), "");
    }
}
