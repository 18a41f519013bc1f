//! Configuration layers and the pure merge over them.
//!
//! Precedence, lowest first: built-in defaults, remote document, script tag.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::model::{EmbedSettings, SettingKey};
use crate::error::{Result, SettingsError};

/// Attributes supplied on the script tag that injected the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptAttributes {
    values: BTreeMap<SettingKey, String>,
}

impl ScriptAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attribute. Returns `false` for unrecognized names, which are
    /// ignored.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> bool {
        match SettingKey::from_name(name) {
            Some(key) => {
                self.values.insert(key, value.into());
                true
            }
            None => {
                debug!(
                    name: "embed.script.unknown_attribute",
                    attribute = %name,
                    "Ignoring unrecognized script-tag attribute"
                );
                false
            }
        }
    }

    /// Raw attribute value.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Attribute value if present and not blank.
    #[must_use]
    pub fn non_empty(&self, key: SettingKey) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ScriptAttributes
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (name, value) in iter {
            attributes.insert(name.as_ref(), value);
        }
        attributes
    }
}

/// Values read from the remote `embed` settings object.
///
/// `uuid` maps onto [`SettingKey::EmbedId`]; `null` entries are treated as
/// absent. Keys that only the script tag may set are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteEmbed {
    values: BTreeMap<SettingKey, Value>,
}

#[derive(Deserialize)]
struct SettingsResponse {
    embed: Option<Map<String, Value>>,
}

impl RemoteEmbed {
    /// Parse a full response body of the form `{ "embed": { ... } }`.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let response: SettingsResponse = serde_json::from_slice(body)?;
        let embed = response.embed.ok_or(SettingsError::MissingEmbed)?;
        Ok(Self::from_object(&embed))
    }

    pub fn from_object(embed: &Map<String, Value>) -> Self {
        let mut values = BTreeMap::new();
        for (name, value) in embed {
            if value.is_null() {
                continue;
            }
            let key = if name == "uuid" {
                Some(SettingKey::EmbedId)
            } else {
                SettingKey::from_name(name).filter(|key| {
                    !matches!(
                        key,
                        SettingKey::EmbedId | SettingKey::BaseApiUrl | SettingKey::BearerToken
                    )
                })
            };
            if let Some(key) = key {
                values.insert(key, value.clone());
            }
        }
        Self { values }
    }

    /// The embed's own identifier (`uuid`), if the document carried one.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.values.get(&SettingKey::EmbedId).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &Value)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}

fn apply_layer<'a>(
    settings: &mut EmbedSettings,
    layer: &'static str,
    values: impl Iterator<Item = (SettingKey, &'a Value)>,
) {
    for (key, value) in values {
        if let Err(err) = settings.apply(key, value) {
            warn!(
                name: "embed.settings.field_rejected",
                layer,
                field = %key,
                error = %err,
                "Rejected settings value, keeping lower-precedence value"
            );
        }
    }
}

/// Merge the three configuration layers into one settings value.
///
/// Pure: logs rejected fields but touches nothing else. A script-tag value
/// wins over a remote value for the same field, so a script-tag `embedId`
/// always beats the remote `uuid`.
pub fn merge_settings(
    defaults: &EmbedSettings,
    remote: Option<&RemoteEmbed>,
    script: &ScriptAttributes,
) -> EmbedSettings {
    let mut merged = defaults.clone();

    if let Some(remote) = remote {
        apply_layer(&mut merged, "remote", remote.iter());
    }

    let script_values: Vec<(SettingKey, Value)> = script
        .iter()
        .map(|(key, value)| (key, Value::from(value)))
        .collect();
    apply_layer(
        &mut merged,
        "script",
        script_values.iter().map(|(key, value)| (*key, value)),
    );

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::model::Position;
    use serde_json::json;

    fn remote(value: Value) -> RemoteEmbed {
        match value {
            Value::Object(map) => RemoteEmbed::from_object(&map),
            _ => panic!("remote fixture must be an object"),
        }
    }

    #[test]
    fn test_script_tag_beats_remote() {
        let remote = remote(json!({
            "uuid": "remote-id",
            "greeting": "Remote hello",
            "buttonColor": "#000000",
            "position": "top-left"
        }));
        let script: ScriptAttributes = [("data-embed-id", "script-id"), ("greeting", "Script hello")]
            .into_iter()
            .collect();

        let merged = merge_settings(&EmbedSettings::default(), Some(&remote), &script);

        assert_eq!(merged.embed_id.as_deref(), Some("script-id"));
        assert_eq!(merged.greeting.as_deref(), Some("Script hello"));
        assert_eq!(merged.button_color, "#000000");
        assert_eq!(merged.position, Position::TopLeft);
    }

    #[test]
    fn test_remote_uuid_fills_missing_embed_id() {
        let remote = remote(json!({ "uuid": "remote-id" }));
        let merged =
            merge_settings(&EmbedSettings::default(), Some(&remote), &ScriptAttributes::new());
        assert_eq!(merged.embed_id.as_deref(), Some("remote-id"));
    }

    #[test]
    fn test_remote_nulls_keep_defaults() {
        let remote = remote(json!({ "buttonColor": null, "sponsorText": null }));
        let merged =
            merge_settings(&EmbedSettings::default(), Some(&remote), &ScriptAttributes::new());
        assert_eq!(merged, EmbedSettings::default());
    }

    #[test]
    fn test_remote_cannot_set_script_only_keys() {
        let remote = remote(json!({ "baseApiUrl": "http://evil", "bearerToken": "t" }));
        assert!(remote.iter().next().is_none());
    }

    #[test]
    fn test_default_messages_from_script_string() {
        let script: ScriptAttributes = [("default-messages", "Hi, What can you do?")]
            .into_iter()
            .collect();
        let merged = merge_settings(&EmbedSettings::default(), None, &script);
        assert_eq!(merged.default_messages, vec!["Hi", "What can you do?"]);
    }

    #[test]
    fn test_invalid_script_value_falls_back_to_remote() {
        let remote = remote(json!({ "textSize": 18 }));
        let script: ScriptAttributes = [("textSize", "huge")].into_iter().collect();
        let merged = merge_settings(&EmbedSettings::default(), Some(&remote), &script);
        assert_eq!(merged.text_size, Some(18));
    }

    #[test]
    fn test_from_body_requires_embed() {
        let err = RemoteEmbed::from_body(br#"{"other": {}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::MissingEmbed));

        let err = RemoteEmbed::from_body(b"not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));

        let ok = RemoteEmbed::from_body(br#"{"embed": {"uuid": "abc"}}"#).unwrap();
        assert_eq!(ok.uuid(), Some("abc"));
    }
}
