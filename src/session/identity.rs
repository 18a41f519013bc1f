//! Stable per-browser session identifier.

use std::fmt;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::platform::Platform;

/// Opaque session identifier, created once per embed and browser context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage key holding the session id for an embed.
#[must_use]
pub fn storage_key(embed_id: Option<&str>) -> String {
    match embed_id {
        Some(id) if !id.trim().is_empty() => format!("allm_{}_session_id", id.trim()),
        _ => "allm_session_id".to_string(),
    }
}

/// Return the stored session id, creating and persisting one if absent.
pub fn session_id(platform: &dyn Platform, embed_id: Option<&str>) -> SessionId {
    let key = storage_key(embed_id);
    if let Some(existing) = platform.storage_get(&key).filter(|id| !id.is_empty()) {
        return SessionId(existing);
    }

    let id = Uuid::new_v4().to_string();
    platform.storage_set(&key, &id);
    debug!(name: "embed.session.created", key = %key, "Created new widget session id");
    SessionId(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn test_session_id_is_reused() {
        let platform = HeadlessPlatform::new();
        let first = session_id(&platform, Some("embed-1"));
        let second = session_id(&platform, Some("embed-1"));
        assert_eq!(first, second);
        assert_eq!(
            platform.storage_get("allm_embed-1_session_id").as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn test_session_id_is_scoped_per_embed() {
        let platform = HeadlessPlatform::new();
        let a = session_id(&platform, Some("a"));
        let b = session_id(&platform, Some("b"));
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_storage_key_without_embed() {
        assert_eq!(storage_key(None), "allm_session_id");
        assert_eq!(storage_key(Some("  ")), "allm_session_id");
    }
}
