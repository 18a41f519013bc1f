//! Leptos components for the widget, rendered server-side to HTML.
//!
//! # Structure
//!
//! - [`app`]: root composition ([`EmbedApp`])
//! - [`chat`]: the open chat panel
//! - [`components`]: avatars, icons and the scroll container
//!
//! Every class carries the `allm-` prefix so host-page styles do not collide.

pub mod app;
pub mod chat;
pub mod components;

pub use app::EmbedApp;
