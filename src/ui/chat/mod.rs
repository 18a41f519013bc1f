//! Chat panel components.
//!
//! - [`ChatWindow`]: header, history and sponsor footer of the open panel
//! - [`ChatHistoryView`]: message list, welcome state and jump-to-bottom control
//! - [`HistoricalMessage`], [`PromptReply`]: finalized and live bubbles

mod history;
mod message;
mod window;

pub use history::{
    ChatHistoryLoading, ChatHistoryView, DEFAULT_GREETING, SuggestedMessages, WELCOME_GIF,
    send_suggestion,
};
pub use message::{ErrorBubble, FALLBACK_ERROR_MESSAGE, HistoricalMessage, PromptReply};
pub use window::{ChatWindow, ChatWindowHeader, SponsorFooter};
