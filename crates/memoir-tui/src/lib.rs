//! memoir-tui: Terminal UI components
//!
//! Input translation, theming, and the widgets the memoir views are built
//! from, on top of ratatui and crossterm.

pub mod input;
pub mod term;
pub mod theme;
pub mod widgets;

pub use term::TerminalGuard;
pub use theme::Theme;
