//! Reusable widget UI pieces.
//!
//! # Components
//!
//! - [`AssistantAvatar`], [`UserAvatar`]: author avatars beside bubbles
//! - [`ScrollArea`]: scrollable container
//! - [`icons`]: SVG icon components

mod avatar;
mod icons;
mod scroll_area;

pub use avatar::{AssistantAvatar, DEFAULT_ASSISTANT_ICON, UserAvatar};
pub use icons::*;
pub use scroll_area::ScrollArea;
