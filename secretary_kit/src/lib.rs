//! Secretary kit - Telegram helpers shared by the secretary bot

// Private API modules
pub(crate) mod api;

// Public markdown module with re-exports
pub mod markdown {
    // Re-export types and traits from internal API
    pub use crate::api::markdown::{
        string::{MarkdownString, MarkdownStringMessage, TELEGRAM_MAX_MESSAGE_LENGTH},
        validate::validate_markdownv2_format,
    };
}

// Public command argument helpers
pub mod args {
    pub use crate::api::args::{escape_spaces, split_arguments};
}
