//! Per-embed chat session identity.
//!
//! The session id is persisted in platform storage under
//! `allm_{embedId}_session_id`, so reloading the host page keeps the same
//! conversation.
//!
//! # Example
//!
//! ```rust
//! use embed_widget::platform::HeadlessPlatform;
//! use embed_widget::session::session_id;
//!
//! let platform = HeadlessPlatform::new();
//! let first = session_id(&platform, Some("embed-1"));
//! let again = session_id(&platform, Some("embed-1"));
//! assert_eq!(first, again);
//! ```

mod identity;

pub use identity::{SessionId, session_id, storage_key};
