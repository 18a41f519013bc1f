//! Chat history: entries, render planning and scroll management.
//!
//! # Architecture
//!
//! - [`ChatEntry`] / [`ChatHistory`]: ordered, append-only entries held as
//!   immutable snapshots
//! - [`plan`]: picks the static or live-reply path for each entry
//! - [`ScrollWatcher`]: debounced at-bottom tracking
//! - [`ChatHistoryController`]: auto-scroll and jump-to-bottom
//!
//! # Example
//!
//! ```rust
//! use embed_widget::history::{ChatEntry, ChatHistory, RenderMode, plan};
//!
//! let history = ChatHistory::new()
//!     .appended(ChatEntry::user("Hello!"))
//!     .appended(ChatEntry::reply_placeholder());
//!
//! let modes: Vec<_> = plan(history.entries()).map(|(mode, _)| mode).collect();
//! assert_eq!(modes, vec![RenderMode::Historical, RenderMode::LiveReply]);
//! ```

mod controller;
mod entry;
mod plan;
mod scroll;

pub use controller::ChatHistoryController;
pub use entry::{ChatEntry, ChatHistory, Role, Source};
pub use plan::{RenderMode, plan, render_mode};
pub use scroll::{AT_BOTTOM_THRESHOLD_PX, SCROLL_DEBOUNCE, ScrollWatcher};
