//! Error types for settings resolution.

use thiserror::Error;

/// Failure while resolving the embed settings.
///
/// None of these are fatal to the widget: the resolver logs them and settles
/// to a fallback configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Required script-tag fields are absent, so no request is attempted.
    #[error("Missing required parameters for boot: {}", .missing.join(", "))]
    Incomplete {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },

    /// The settings endpoint could not be built from `baseApiUrl`.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("API request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// JSON body could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed but carried no `embed` object.
    #[error("Response body has no embed settings object")]
    MissingEmbed,
}

/// A single field value that could not be accepted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The value has the wrong JSON shape for this field.
    #[error("{field}: expected {expected}, got {found}")]
    Shape {
        /// Field name (camelCase).
        field: &'static str,
        /// What the field accepts.
        expected: &'static str,
        /// Short description of what was supplied.
        found: String,
    },

    /// The value has the right shape but is not one of the accepted values.
    #[error("{field}: unsupported value {value:?}")]
    Unsupported {
        /// Field name (camelCase).
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
