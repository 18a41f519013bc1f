//! Root composition: settings, session, open state and history together.

use std::sync::Arc;

use leptos::prelude::*;
use tokio::sync::watch;
use tracing::info;

use crate::history::{ChatEntry, ChatHistory, ChatHistoryController};
use crate::platform::{Platform, ScrollSurface};
use crate::session::{SessionId, session_id};
use crate::settings::{EmbedSettings, ScriptAttributes, SettingKey, SettingsHandle, SettingsResolver};
use crate::ui::EmbedApp;

/// Shared open/closed flag with a single setter.
#[derive(Debug, Clone)]
pub struct OpenToggle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for OpenToggle {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OpenToggle {
    pub fn new(open: bool) -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(open)),
        }
    }

    pub fn toggle_open_chat(&self, show: bool) {
        self.tx.send_replace(show);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Everything the root view needs for one render.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    /// `None` until settings resolution settles.
    pub settings: Option<Arc<EmbedSettings>>,
    pub history: ChatHistory,
    pub open: OpenToggle,
    pub controller: Arc<ChatHistoryController>,
    pub platform: Arc<dyn Platform>,
}

/// A mounted widget instance.
///
/// Mounting starts settings resolution in the background; until it settles
/// the widget renders nothing.
#[derive(Debug)]
pub struct EmbedWidget {
    platform: Arc<dyn Platform>,
    settings: SettingsHandle,
    open: OpenToggle,
    auto_open_applied: bool,
    session_id: SessionId,
    history: ChatHistory,
    controller: Arc<ChatHistoryController>,
}

impl EmbedWidget {
    /// Mount the widget. Requires a tokio runtime.
    pub fn mount(
        resolver: SettingsResolver,
        script: ScriptAttributes,
        platform: Arc<dyn Platform>,
        surface: Arc<dyn ScrollSurface>,
    ) -> Self {
        let session_id = session_id(platform.as_ref(), script.non_empty(SettingKey::EmbedId));
        let settings = resolver.spawn(script);

        Self {
            platform,
            settings,
            open: OpenToggle::default(),
            auto_open_applied: false,
            session_id,
            history: ChatHistory::new(),
            controller: Arc::new(ChatHistoryController::new(surface)),
        }
    }

    /// Wait for settings resolution and apply first-load behavior.
    pub async fn settings_loaded(&mut self) -> Option<Arc<EmbedSettings>> {
        let settings = self.settings.loaded().await?;
        self.on_settings_loaded(&settings);
        Some(settings)
    }

    /// Apply first-load behavior if settings have settled since the last call.
    pub fn refresh(&mut self) {
        if let Some(settings) = self.settings.current().settings() {
            self.on_settings_loaded(settings);
        }
    }

    fn on_settings_loaded(&mut self, settings: &EmbedSettings) {
        if self.auto_open_applied {
            return;
        }
        self.auto_open_applied = true;
        if settings.open_on_load {
            info!(name: "embed.widget.auto_open", "Opening chat on load");
            self.open.toggle_open_chat(true);
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.settings.current().is_loaded()
    }

    #[must_use]
    pub fn settings(&self) -> Option<Arc<EmbedSettings>> {
        self.settings.current().settings().map(Arc::clone)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_open()
    }

    pub fn toggle_open_chat(&self, show: bool) {
        self.open.toggle_open_chat(show);
    }

    /// Handle for close/open controls.
    #[must_use]
    pub fn open_toggle(&self) -> OpenToggle {
        self.open.clone()
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    #[must_use]
    pub fn controller(&self) -> &Arc<ChatHistoryController> {
        &self.controller
    }

    /// Replace the history snapshot wholesale.
    pub fn set_history(&mut self, history: ChatHistory) {
        self.history = history;
        self.controller.history_changed();
    }

    pub fn push_entry(&mut self, entry: ChatEntry) {
        let next = self.history.appended(entry);
        self.set_history(next);
    }

    /// Modify the last entry, e.g. append streamed text to the live reply.
    pub fn update_last(&mut self, update: impl FnOnce(&mut ChatEntry)) {
        let next = self.history.with_last_updated(update);
        self.set_history(next);
    }

    #[must_use]
    pub fn snapshot(&self) -> WidgetSnapshot {
        WidgetSnapshot {
            settings: self.settings(),
            history: self.history.clone(),
            open: self.open.clone(),
            controller: Arc::clone(&self.controller),
            platform: Arc::clone(&self.platform),
        }
    }

    /// Server-side render of the whole widget.
    #[must_use]
    pub fn render(&self) -> String {
        let snapshot = self.snapshot();
        Owner::new().with(|| view! { <EmbedApp snapshot=snapshot /> }.to_html())
    }
}
