//! UI widgets

pub mod input_box;
pub mod message_list;
pub mod spinner;
pub mod text_area;

pub use input_box::InputBox;
pub use message_list::{ChatMessage, MessageList, Speaker};
pub use spinner::{Spinner, TypingIndicator};
pub use text_area::TextArea;
