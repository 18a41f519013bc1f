//! The resolved widget configuration and its recognized keys.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::validate;
use crate::error::FieldError;

/// Every configuration key the widget recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SettingKey {
    EmbedId,
    BaseApiUrl,
    BearerToken,
    Prompt,
    Model,
    Temperature,
    ChatIcon,
    BrandImageUrl,
    Greeting,
    ButtonColor,
    UserBgColor,
    AssistantBgColor,
    NoSponsor,
    SponsorText,
    SponsorLink,
    Position,
    AssistantName,
    AssistantIcon,
    WindowHeight,
    WindowWidth,
    TextSize,
    OpenOnLoad,
    SupportEmail,
    Username,
    DefaultMessages,
}

impl SettingKey {
    /// All keys, in declaration order.
    pub const ALL: [SettingKey; 25] = [
        Self::EmbedId,
        Self::BaseApiUrl,
        Self::BearerToken,
        Self::Prompt,
        Self::Model,
        Self::Temperature,
        Self::ChatIcon,
        Self::BrandImageUrl,
        Self::Greeting,
        Self::ButtonColor,
        Self::UserBgColor,
        Self::AssistantBgColor,
        Self::NoSponsor,
        Self::SponsorText,
        Self::SponsorLink,
        Self::Position,
        Self::AssistantName,
        Self::AssistantIcon,
        Self::WindowHeight,
        Self::WindowWidth,
        Self::TextSize,
        Self::OpenOnLoad,
        Self::SupportEmail,
        Self::Username,
        Self::DefaultMessages,
    ];

    /// Canonical camelCase name, as used in the remote document.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EmbedId => "embedId",
            Self::BaseApiUrl => "baseApiUrl",
            Self::BearerToken => "bearerToken",
            Self::Prompt => "prompt",
            Self::Model => "model",
            Self::Temperature => "temperature",
            Self::ChatIcon => "chatIcon",
            Self::BrandImageUrl => "brandImageUrl",
            Self::Greeting => "greeting",
            Self::ButtonColor => "buttonColor",
            Self::UserBgColor => "userBgColor",
            Self::AssistantBgColor => "assistantBgColor",
            Self::NoSponsor => "noSponsor",
            Self::SponsorText => "sponsorText",
            Self::SponsorLink => "sponsorLink",
            Self::Position => "position",
            Self::AssistantName => "assistantName",
            Self::AssistantIcon => "assistantIcon",
            Self::WindowHeight => "windowHeight",
            Self::WindowWidth => "windowWidth",
            Self::TextSize => "textSize",
            Self::OpenOnLoad => "openOnLoad",
            Self::SupportEmail => "supportEmail",
            Self::Username => "username",
            Self::DefaultMessages => "defaultMessages",
        }
    }

    /// Look a key up by attribute name.
    ///
    /// Accepts `embedId`, `embed-id`, `embed_id` and `data-embed-id` spellings,
    /// case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let bare = trimmed
            .strip_prefix("data-")
            .or_else(|| trimmed.strip_prefix("data_"))
            .unwrap_or(trimmed);
        let folded: String = bare
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(&folded))
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Screen corner the widget is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    BottomLeft,
    #[default]
    BottomRight,
    TopLeft,
    TopRight,
}

impl Position {
    /// Placement classes for the panel and the open button.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::BottomLeft => "allm-bottom-0 allm-left-0 allm-ml-4",
            Self::BottomRight => "allm-bottom-0 allm-right-0 allm-mr-4",
            Self::TopLeft => "allm-top-0 allm-left-0 allm-ml-4 allm-mt-4",
            Self::TopRight => "allm-top-0 allm-right-0 allm-mr-4 allm-mt-4",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
        }
    }
}

impl FromStr for Position {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            other => Err(FieldError::Unsupported {
                field: SettingKey::Position.name(),
                value: other.to_string(),
            }),
        }
    }
}

/// Bearer token wrapper that keeps the secret out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Fully resolved widget configuration.
///
/// Every recognized key holds a value: either one supplied by a layer or the
/// built-in default from [`EmbedSettings::default`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedSettings {
    pub embed_id: Option<String>,
    pub base_api_url: Option<String>,
    #[serde(skip)]
    pub bearer_token: Option<BearerToken>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub chat_icon: String,
    pub brand_image_url: Option<String>,
    pub greeting: Option<String>,
    pub button_color: String,
    pub user_bg_color: String,
    pub assistant_bg_color: String,
    pub no_sponsor: bool,
    pub sponsor_text: String,
    pub sponsor_link: String,
    pub position: Position,
    pub assistant_name: String,
    pub assistant_icon: Option<String>,
    pub window_height: Option<String>,
    pub window_width: Option<String>,
    pub text_size: Option<u32>,
    pub open_on_load: bool,
    pub support_email: Option<String>,
    pub username: Option<String>,
    pub default_messages: Vec<String>,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            embed_id: None,
            base_api_url: None,
            bearer_token: None,
            prompt: None,
            model: None,
            temperature: None,
            chat_icon: "plus".to_string(),
            brand_image_url: None,
            greeting: None,
            button_color: "#262626".to_string(),
            user_bg_color: "#2C2F35".to_string(),
            assistant_bg_color: "#2563eb".to_string(),
            no_sponsor: false,
            sponsor_text: "Powered by AnythingLLM".to_string(),
            sponsor_link: "https://anythingllm.com".to_string(),
            position: Position::BottomRight,
            assistant_name: "AnythingLLM Chat Assistant".to_string(),
            assistant_icon: None,
            window_height: None,
            window_width: None,
            text_size: None,
            open_on_load: false,
            support_email: None,
            username: None,
            default_messages: Vec::new(),
        }
    }
}

impl EmbedSettings {
    /// Rendered panel width, `400px` when unset.
    #[must_use]
    pub fn window_width_or_default(&self) -> &str {
        self.window_width.as_deref().unwrap_or("400px")
    }

    /// Rendered panel height, `600px` when unset.
    #[must_use]
    pub fn window_height_or_default(&self) -> &str {
        self.window_height.as_deref().unwrap_or("600px")
    }

    /// Overwrite one field from a raw layer value.
    ///
    /// On error the field keeps its previous value. `defaultMessages` never
    /// errors: a malformed value resets it to an empty list.
    pub fn apply(&mut self, key: SettingKey, value: &Value) -> Result<(), FieldError> {
        let field = key.name();
        match key {
            SettingKey::EmbedId => self.embed_id = Some(validate::string(field, value)?),
            SettingKey::BaseApiUrl => self.base_api_url = Some(validate::string(field, value)?),
            SettingKey::BearerToken => {
                self.bearer_token = Some(BearerToken::new(validate::string(field, value)?));
            }
            SettingKey::Prompt => self.prompt = Some(validate::string(field, value)?),
            SettingKey::Model => self.model = Some(validate::string(field, value)?),
            SettingKey::Temperature => self.temperature = Some(validate::number(field, value)?),
            SettingKey::ChatIcon => self.chat_icon = validate::string(field, value)?,
            SettingKey::BrandImageUrl => {
                self.brand_image_url = Some(validate::string(field, value)?);
            }
            SettingKey::Greeting => self.greeting = Some(validate::string(field, value)?),
            SettingKey::ButtonColor => self.button_color = validate::string(field, value)?,
            SettingKey::UserBgColor => self.user_bg_color = validate::string(field, value)?,
            SettingKey::AssistantBgColor => {
                self.assistant_bg_color = validate::string(field, value)?;
            }
            SettingKey::NoSponsor => self.no_sponsor = validate::flag(field, value)?,
            SettingKey::SponsorText => self.sponsor_text = validate::string(field, value)?,
            SettingKey::SponsorLink => self.sponsor_link = validate::string(field, value)?,
            SettingKey::Position => {
                self.position = validate::string(field, value)?.parse()?;
            }
            SettingKey::AssistantName => self.assistant_name = validate::string(field, value)?,
            SettingKey::AssistantIcon => {
                self.assistant_icon = Some(validate::string(field, value)?);
            }
            SettingKey::WindowHeight => {
                self.window_height = Some(validate::css_length(field, value)?);
            }
            SettingKey::WindowWidth => {
                self.window_width = Some(validate::css_length(field, value)?);
            }
            SettingKey::TextSize => self.text_size = Some(validate::pixels(field, value)?),
            SettingKey::OpenOnLoad => self.open_on_load = validate::flag(field, value)?,
            SettingKey::SupportEmail => self.support_email = Some(validate::string(field, value)?),
            SettingKey::Username => self.username = Some(validate::string(field, value)?),
            SettingKey::DefaultMessages => {
                self.default_messages =
                    validate::default_messages(value).unwrap_or_else(|err| {
                        warn!(
                            name: "embed.settings.default_messages_invalid",
                            error = %err,
                            "defaultMessages must be an array of strings or a single comma-separated string"
                        );
                        Vec::new()
                    });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn test_key_lookup_accepts_attribute_spellings() {
        assert_eq!(SettingKey::from_name("embedId"), Some(SettingKey::EmbedId));
        assert_eq!(SettingKey::from_name("data-embed-id"), Some(SettingKey::EmbedId));
        assert_eq!(SettingKey::from_name("base_api_url"), Some(SettingKey::BaseApiUrl));
        assert_eq!(SettingKey::from_name("OPEN-ON-LOAD"), Some(SettingKey::OpenOnLoad));
        assert_eq!(SettingKey::from_name("welcomeGif"), None);
    }

    #[test]
    fn test_every_key_round_trips_through_its_name() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_defaults() {
        let settings = EmbedSettings::default();
        assert_eq!(settings.chat_icon, "plus");
        assert_eq!(settings.position, Position::BottomRight);
        assert_eq!(settings.window_width_or_default(), "400px");
        assert_eq!(settings.window_height_or_default(), "600px");
        assert!(settings.default_messages.is_empty());
        assert!(!settings.open_on_load);
    }

    #[test]
    fn test_apply_rejected_value_keeps_previous() {
        let mut settings = EmbedSettings::default();
        let err = settings
            .apply(SettingKey::Position, &json!("middle"))
            .unwrap_err();
        assert!(matches!(err, FieldError::Unsupported { .. }));
        assert_eq!(settings.position, Position::BottomRight);

        settings.apply(SettingKey::TextSize, &json!("big")).unwrap_err();
        assert_eq!(settings.text_size, None);
    }

    #[test]
    fn test_apply_malformed_default_messages_resets_to_empty() {
        let mut settings = EmbedSettings::default();
        settings
            .apply(SettingKey::DefaultMessages, &json!(["hi"]))
            .unwrap();
        assert_eq!(settings.default_messages, vec!["hi"]);

        settings
            .apply(SettingKey::DefaultMessages, &json!({"not": "a list"}))
            .unwrap();
        assert!(settings.default_messages.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_malformed_default_messages_are_logged() {
        let mut settings = EmbedSettings::default();
        settings
            .apply(SettingKey::DefaultMessages, &json!(42))
            .unwrap();
        assert!(settings.default_messages.is_empty());
        assert!(logs_contain("defaultMessages must be an array of strings"));
    }

    #[test]
    fn test_bearer_token_debug_is_redacted() {
        let mut settings = EmbedSettings::default();
        settings
            .apply(SettingKey::BearerToken, &json!("secret-token"))
            .unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("secret-token"));
        assert_eq!(
            settings.bearer_token.as_ref().map(BearerToken::expose),
            Some("secret-token")
        );
    }
}
