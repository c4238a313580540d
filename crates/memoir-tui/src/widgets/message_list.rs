//! Message list widget for the assistant conversation

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Who a message is attributed to on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// A single message as the list displays it.
///
/// `content` is the text to show right now; during a reveal the caller
/// passes the revealed prefix and sets `is_revealing` so the caret is
/// drawn.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
    /// Error fallbacks get error styling
    pub is_error: bool,
    /// Whether this message is mid-reveal
    pub is_revealing: bool,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            is_error: false,
            is_revealing: false,
        }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
            is_error: false,
            is_revealing: false,
        }
    }

    /// Mark as an error fallback.
    pub fn error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Mark as mid-reveal.
    pub fn revealing(mut self) -> Self {
        self.is_revealing = true;
        self
    }
}

/// Widget rendering the conversation as a scrollable list.
pub struct MessageList<'a> {
    messages: &'a [ChatMessage],
    theme: &'a Theme,
    scroll: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(messages: &'a [ChatMessage], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            scroll: 0,
        }
    }

    /// Set scroll offset in lines.
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn render_message(&self, msg: &ChatMessage, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let (name, style, prefix) = match msg.speaker {
            Speaker::User => ("You", self.theme.accent_bold(), "▶ "),
            Speaker::Assistant => ("Assistant", self.theme.success_style(), "◀ "),
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", prefix, name),
            style,
        )));

        let content_style = if msg.is_error {
            self.theme.error_style()
        } else {
            self.theme.base_style()
        };

        let content_width = width.saturating_sub(2).max(1);
        if msg.content.is_empty() {
            // Nothing revealed yet: just the caret
            if msg.is_revealing {
                lines.push(Line::from(Span::styled("  ▌".to_string(), content_style)));
            }
        } else {
            let wrapped = textwrap::wrap(&msg.content, content_width);
            let last = wrapped.len().saturating_sub(1);
            for (i, line) in wrapped.iter().enumerate() {
                // Caret on the final line while revealing
                let text = if msg.is_revealing && i == last {
                    format!("  {}▌", line)
                } else {
                    format!("  {}", line)
                };
                lines.push(Line::from(Span::styled(text, content_style)));
            }
        }

        lines.push(Line::from(""));
        lines
    }
}

impl Widget for MessageList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;
        let mut all_lines: Vec<Line> = Vec::new();
        for msg in self.messages {
            all_lines.extend(self.render_message(msg, width));
        }

        let visible: Vec<Line> = all_lines
            .into_iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .collect();

        Paragraph::new(visible)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Total rendered height of the messages at the given width. Must stay in
/// step with the render logic; used by the caller for auto-scroll.
pub fn measure_height(messages: &[ChatMessage], width: usize) -> usize {
    let content_width = width.saturating_sub(2).max(1);
    let mut total = 0;
    for msg in messages {
        // Header
        total += 1;
        if msg.content.is_empty() {
            if msg.is_revealing {
                total += 1;
            }
        } else {
            total += textwrap::wrap(&msg.content, content_width).len();
        }
        // Separator
        total += 1;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_height_counts_header_content_separator() {
        let messages = vec![ChatMessage::user("hi")];
        assert_eq!(measure_height(&messages, 40), 3);
    }

    #[test]
    fn test_measure_height_wraps_long_content() {
        let messages = vec![ChatMessage::assistant("a".repeat(50))];
        // 50 chars at content width 18 -> 3 wrapped lines
        assert_eq!(measure_height(&messages, 20), 5);
    }

    #[test]
    fn test_measure_height_empty_revealing_message_has_caret_line() {
        let messages = vec![ChatMessage::assistant("").revealing()];
        assert_eq!(measure_height(&messages, 40), 3);
    }
}
