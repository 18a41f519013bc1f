//! Command-line and file configuration for the `embed-widget` binary.
//!
//! Sources, lowest to highest priority: built-in defaults, an optional config
//! file, `ALLM_`-prefixed environment variables (`ALLM_WIDGET__EMBED_ID`),
//! then command-line flags (which clap may also read from their own env vars).

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::settings::{ScriptAttributes, SettingKey};

/// Default config file stem, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "embed-widget";

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve and render an embedded chat widget", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Chat server base URL, as the `data-base-api-url` script attribute
    #[arg(long, env = "EMBED_BASE_API_URL")]
    pub base_api_url: Option<String>,

    /// Embed identifier
    #[arg(long, env = "EMBED_ID")]
    pub embed_id: Option<String>,

    /// Bearer token sent with the settings request
    #[arg(long, env = "EMBED_BEARER_TOKEN")]
    pub bearer_token: Option<String>,

    /// Token used when no script attribute supplies one
    #[arg(long, env = "EMBED_FALLBACK_BEARER_TOKEN")]
    pub fallback_bearer_token: Option<String>,

    /// Extra script attribute, e.g. `-a data-button-color=#000`
    #[arg(short = 'a', long = "attr", value_parser = parse_attribute)]
    pub attributes: Vec<(String, String)>,

    /// JSON file with chat history entries to render
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Render the widget opened
    #[arg(long)]
    pub open: Option<bool>,

    /// Print resolved settings as JSON instead of HTML
    #[arg(long)]
    pub print_settings: Option<bool>,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("attribute name is empty in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub render: RenderConfig,
}

/// Values standing in for the script tag's `data-*` attributes.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct WidgetConfig {
    pub base_api_url: Option<String>,
    pub embed_id: Option<String>,
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    pub fallback_bearer_token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    pub open: bool,
    pub history: Option<PathBuf>,
    pub print_settings: bool,
}

impl WidgetConfig {
    /// Script attributes for settings resolution.
    ///
    /// The dedicated fields win over the same keys in `attributes`.
    #[must_use]
    pub fn script_attributes(&self) -> ScriptAttributes {
        let mut script: ScriptAttributes = self.attributes.iter().collect();
        let dedicated = [
            (SettingKey::BaseApiUrl, &self.base_api_url),
            (SettingKey::EmbedId, &self.embed_id),
            (SettingKey::BearerToken, &self.bearer_token),
        ];
        for (key, value) in dedicated {
            if let Some(value) = value {
                script.insert(key.name(), value.clone());
            }
        }
        script
    }
}

impl AuthConfig {
    #[must_use]
    pub fn fallback_bearer_token(&self) -> Option<&str> {
        self.fallback_bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("render.open", false)?
            .set_default("render.print_settings", false)?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("ALLM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let overrides = [
            ("widget.base_api_url", &cli.base_api_url),
            ("widget.embed_id", &cli.embed_id),
            ("widget.bearer_token", &cli.bearer_token),
            ("auth.fallback_bearer_token", &cli.fallback_bearer_token),
        ];
        for (key, value) in overrides {
            if let Some(value) = value {
                builder = builder.set_override(key, value.as_str())?;
            }
        }
        if let Some(open) = cli.open {
            builder = builder.set_override("render.open", open)?;
        }
        if let Some(print) = cli.print_settings {
            builder = builder.set_override("render.print_settings", print)?;
        }
        if let Some(history) = &cli.history {
            builder = builder.set_override("render.history", history.to_string_lossy().into_owned())?;
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        // Attribute names are kept verbatim; the config crate would fold their case.
        cfg.widget.attributes.extend(cli.attributes);
        Ok(cfg)
    }
}
