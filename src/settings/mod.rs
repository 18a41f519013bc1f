//! Widget settings: defaults, layers, validation and resolution.
//!
//! Settings come from three layers, lowest precedence first:
//!
//! 1. Built-in defaults ([`EmbedSettings::default`])
//! 2. The remote `embed` document fetched from `{base}/v1/embed/{embedId}`
//! 3. Attributes on the script tag that injected the widget
//!
//! [`merge_settings`] is the pure merge over those layers. [`SettingsResolver`]
//! performs the single fetch and always settles, falling back to defaults (no
//! usable script tag) or to defaults plus script tag (fetch failed).
//!
//! # Example
//!
//! ```rust
//! use embed_widget::settings::{EmbedSettings, ScriptAttributes, merge_settings};
//!
//! let script: ScriptAttributes = [("data-greeting", "Hello!")].into_iter().collect();
//! let settings = merge_settings(&EmbedSettings::default(), None, &script);
//! assert_eq!(settings.greeting.as_deref(), Some("Hello!"));
//! ```

mod layers;
mod model;
mod resolver;
pub mod validate;

pub use layers::{RemoteEmbed, ScriptAttributes, merge_settings};
pub use model::{BearerToken, EmbedSettings, Position, SettingKey};
pub use resolver::{
    EmbedSettingsSource, HttpSettingsSource, SettingsHandle, SettingsResolver, SettingsState,
    settings_endpoint,
};
