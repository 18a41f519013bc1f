//! Embeddable chat widget
//!
//! A script-tag-injected chat panel: it resolves its configuration from
//! script attributes and a remote embed-settings endpoint, renders the chat
//! history with sanitized markdown, and toggles between a floating open
//! button and the chat window.
//!
//! # Architecture
//!
//! - **Settings**: default → remote → script-tag precedence, one fetch per mount
//! - **History**: immutable snapshots, live-reply selection, debounced
//!   at-bottom tracking
//! - **UI**: Leptos components rendered to HTML
//! - **Platform**: event dispatch, storage and scroll measurement behind traits
//!
//! # Modules
//!
//! - [`settings`]: settings model, validation, merge and resolution
//! - [`history`]: chat entries and scroll management
//! - [`session`]: persisted session identity
//! - [`platform`]: host capabilities and headless implementations
//! - [`ui`]: view components
//! - [`widget`]: root composition

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![recursion_limit = "256"]

pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod markdown;
pub mod platform;
pub mod session;
pub mod settings;
pub mod ui;
pub mod widget;

pub use error::{Result, SettingsError};
pub use widget::{EmbedWidget, OpenToggle, WidgetSnapshot};
