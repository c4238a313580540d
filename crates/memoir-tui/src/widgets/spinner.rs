//! Animated progress indicators

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::Span, widgets::Widget};
use std::time::{Duration, Instant};

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames for the assistant's typing indicator
const TYPING_FRAMES: &[&str] = &["·  ", "·· ", "···", " ··", "  ·", "   "];

fn frame_index(start: Instant, frame_time: Duration, len: usize) -> usize {
    let elapsed = start.elapsed().as_millis();
    (elapsed / frame_time.as_millis().max(1)) as usize % len
}

/// Animated braille spinner with a label, used in the status bar
pub struct Spinner<'a> {
    label: &'a str,
    theme: &'a Theme,
    start_time: Instant,
}

impl<'a> Spinner<'a> {
    pub fn new(label: &'a str, theme: &'a Theme) -> Self {
        Self {
            label,
            theme,
            start_time: Instant::now(),
        }
    }

    /// Pin the animation to a specific start time so frames advance
    /// consistently across renders.
    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start_time = start;
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 {
            return;
        }
        let frame = SPINNER_FRAMES[frame_index(
            self.start_time,
            Duration::from_millis(80),
            SPINNER_FRAMES.len(),
        )];
        let text = format!("{} {}", frame, self.label);
        let span = Span::styled(&text, self.theme.accent_style());
        buf.set_span(area.x, area.y, &span, area.width);
    }
}

/// Bouncing-dots indicator shown while waiting for the assistant
pub struct TypingIndicator<'a> {
    theme: &'a Theme,
    start_time: Instant,
}

impl<'a> TypingIndicator<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            start_time: Instant::now(),
        }
    }

    /// Pin the animation to a specific start time.
    pub fn with_start_time(mut self, start: Instant) -> Self {
        self.start_time = start;
        self
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 {
            return;
        }
        let frame = TYPING_FRAMES[frame_index(
            self.start_time,
            Duration::from_millis(160),
            TYPING_FRAMES.len(),
        )];
        let span = Span::styled(frame, self.theme.dim_style());
        buf.set_span(area.x, area.y, &span, area.width);
    }
}
