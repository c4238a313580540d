//! memoir-core: Domain state for the memoir client
//!
//! This crate owns the assistant conversation state machine, the entry
//! save lifecycle, and the dashboard summary reshaping. It performs no I/O
//! of its own; the backend is reached through the [`QueryService`] seam.

pub mod assistant;
pub mod conversation;
pub mod entry;
pub mod stats;

pub use assistant::{QueryService, run_turn};
pub use conversation::{Conversation, ERROR_FALLBACK, Message, NO_ANSWER_FALLBACK, Role};
pub use entry::{Banner, BannerKind, EntrySaver};
pub use stats::DashboardStats;
