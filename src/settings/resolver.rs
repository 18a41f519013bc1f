//! Settings resolution: script tag + remote document → published settings.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tokio::sync::watch;
use tracing::{error, info};
use url::Url;

use super::layers::{RemoteEmbed, ScriptAttributes, merge_settings};
use super::model::{BearerToken, EmbedSettings, SettingKey};
use crate::error::{Result, SettingsError};

/// Where the remote `embed` document comes from.
#[async_trait]
pub trait EmbedSettingsSource: Send + Sync + fmt::Debug {
    /// Fetch the settings document for one embed.
    async fn fetch(&self, endpoint: &Url, bearer_token: &str) -> Result<RemoteEmbed>;
}

/// Fetches settings over HTTP with `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpSettingsSource {
    http: reqwest::Client,
}

impl HttpSettingsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (proxies, custom TLS roots, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl EmbedSettingsSource for HttpSettingsSource {
    async fn fetch(&self, endpoint: &Url, bearer_token: &str) -> Result<RemoteEmbed> {
        let response = self
            .http
            .get(endpoint.clone())
            .header(ACCEPT, "application/json")
            .bearer_auth(bearer_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SettingsError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        RemoteEmbed::from_body(&body)
    }
}

/// Build `{base}/v1/embed/{embed_id}` from the script tag's `baseApiUrl`.
///
/// A trailing `/embed` (and trailing slash) on the base is dropped first.
pub fn settings_endpoint(base_api_url: &str, embed_id: &str) -> Result<Url> {
    let trimmed = base_api_url.trim().trim_end_matches('/');
    let base = trimmed.strip_suffix("/embed").unwrap_or(trimmed);
    let mut url = Url::parse(base)?;
    url.set_query(None);
    url.set_fragment(None);
    // The id is a single percent-encoded segment; it can never climb the path.
    url.path_segments_mut()
        .map_err(|()| SettingsError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(["v1", "embed", embed_id]);
    Ok(url)
}

/// Resolution progress, published through a watch channel.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsState {
    /// Resolution has not finished; the widget renders nothing.
    Loading,
    /// Resolution finished, successfully or by falling back.
    Loaded(Arc<EmbedSettings>),
}

impl SettingsState {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn settings(&self) -> Option<&Arc<EmbedSettings>> {
        match self {
            Self::Loaded(settings) => Some(settings),
            Self::Loading => None,
        }
    }
}

/// Receiving side of a spawned resolution.
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    rx: watch::Receiver<SettingsState>,
}

impl SettingsHandle {
    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> SettingsState {
        self.rx.borrow().clone()
    }

    /// Wait until resolution has settled.
    ///
    /// Returns `None` only if the resolving task died without publishing.
    pub async fn loaded(&mut self) -> Option<Arc<EmbedSettings>> {
        let state = self.rx.wait_for(SettingsState::is_loaded).await.ok()?;
        state.settings().map(Arc::clone)
    }
}

/// Resolves the widget configuration once per mount.
#[derive(Clone)]
pub struct SettingsResolver {
    source: Arc<dyn EmbedSettingsSource>,
    fallback_bearer_token: Option<BearerToken>,
    defaults: EmbedSettings,
}

impl fmt::Debug for SettingsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsResolver")
            .field("source", &self.source)
            .field("has_fallback_bearer_token", &self.fallback_bearer_token.is_some())
            .finish()
    }
}

impl SettingsResolver {
    pub fn new(source: Arc<dyn EmbedSettingsSource>) -> Self {
        Self {
            source,
            fallback_bearer_token: None,
            defaults: EmbedSettings::default(),
        }
    }

    /// Resolver backed by [`HttpSettingsSource`].
    pub fn http() -> Self {
        Self::new(Arc::new(HttpSettingsSource::new()))
    }

    /// Token used when the script tag carries none. Operator-supplied only;
    /// there is no built-in token.
    #[must_use]
    pub fn with_fallback_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.fallback_bearer_token = (!token.trim().is_empty()).then(|| BearerToken::new(token));
        self
    }

    /// Resolve settings. Never fails: every error path settles to a fallback.
    ///
    /// Issues at most one request and never retries.
    pub async fn resolve(&self, script: &ScriptAttributes) -> EmbedSettings {
        let bearer_token = script
            .non_empty(SettingKey::BearerToken)
            .map(BearerToken::new)
            .or_else(|| self.fallback_bearer_token.clone());
        let base_api_url = script.non_empty(SettingKey::BaseApiUrl);
        let embed_id = script.non_empty(SettingKey::EmbedId);

        let (Some(base_api_url), Some(embed_id), Some(bearer_token)) =
            (base_api_url, embed_id, bearer_token.as_ref())
        else {
            let missing = [
                (SettingKey::BaseApiUrl, base_api_url.is_none()),
                (SettingKey::EmbedId, embed_id.is_none()),
                (SettingKey::BearerToken, bearer_token.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, absent)| absent.then_some(key.name()))
            .collect();
            let err = SettingsError::Incomplete { missing };
            error!(
                name: "embed.settings.incomplete",
                error = %err,
                "Invalid script tag setup detected, booting with defaults"
            );
            return self.defaults.clone();
        };

        // The request used the trimmed id and the resolved token; publish those.
        let finish = |mut settings: EmbedSettings| {
            settings.embed_id = Some(embed_id.to_string());
            settings.bearer_token = Some(bearer_token.clone());
            settings
        };

        let fallback = |err: &SettingsError| {
            error!(
                name: "embed.settings.fetch_failed",
                embed_id = %embed_id,
                error = %err,
                "Failed to fetch embed settings, keeping script-tag values"
            );
            finish(merge_settings(&self.defaults, None, script))
        };

        let endpoint = match settings_endpoint(base_api_url, embed_id) {
            Ok(endpoint) => endpoint,
            Err(err) => return fallback(&err),
        };

        match self.source.fetch(&endpoint, bearer_token.expose()).await {
            Ok(remote) => {
                let settings = finish(merge_settings(&self.defaults, Some(&remote), script));
                info!(
                    name: "embed.settings.loaded",
                    embed_id = settings.embed_id.as_deref().unwrap_or_default(),
                    endpoint = %endpoint,
                    "Embed settings loaded"
                );
                settings
            }
            Err(err) => fallback(&err),
        }
    }

    /// Resolve on a background task and publish the result exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, script: ScriptAttributes) -> SettingsHandle {
        let (tx, rx) = watch::channel(SettingsState::Loading);
        tokio::spawn(async move {
            let settings = self.resolve(&script).await;
            tx.send_replace(SettingsState::Loaded(Arc::new(settings)));
        });
        SettingsHandle { rx }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_embed_suffix() {
        let url = settings_endpoint("https://llm.example.com/api/embed", "abc").unwrap();
        assert_eq!(url.as_str(), "https://llm.example.com/api/v1/embed/abc");
    }

    #[test]
    fn test_endpoint_keeps_plain_base() {
        let url = settings_endpoint("https://llm.example.com/api/", "abc").unwrap();
        assert_eq!(url.as_str(), "https://llm.example.com/api/v1/embed/abc");
    }

    #[test]
    fn test_endpoint_encodes_embed_id_as_one_segment() {
        let url = settings_endpoint("https://h.example.com/api/embed", "../../admin?x=1").unwrap();
        assert!(url.path().starts_with("/api/v1/embed/"));
        assert!(!url.path().contains("/admin"));
        assert_eq!(url.query(), None);
        assert_eq!(url.host_str(), Some("h.example.com"));
    }

    #[test]
    fn test_endpoint_rejects_garbage() {
        assert!(matches!(
            settings_endpoint("not a url", "abc"),
            Err(SettingsError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_state_accessors() {
        assert!(!SettingsState::Loading.is_loaded());
        let loaded = SettingsState::Loaded(Arc::new(EmbedSettings::default()));
        assert!(loaded.is_loaded());
        assert!(loaded.settings().is_some());
    }
}
