//! Scroll behavior of the chat history element.

use std::sync::Arc;

use tokio::sync::watch;

use super::scroll::ScrollWatcher;
use crate::platform::{ScrollBehavior, ScrollSurface};

/// Owns the history element's scroll lifecycle.
///
/// Created when the history view mounts; dropping it tears down the debounced
/// watcher.
#[derive(Debug)]
pub struct ChatHistoryController {
    surface: Arc<dyn ScrollSurface>,
    watcher: ScrollWatcher,
}

impl ChatHistoryController {
    /// Requires a tokio runtime.
    pub fn new(surface: Arc<dyn ScrollSurface>) -> Self {
        let watcher = ScrollWatcher::spawn(Arc::clone(&surface));
        Self { surface, watcher }
    }

    /// Build around an existing watcher (custom debounce).
    pub fn with_watcher(surface: Arc<dyn ScrollSurface>, watcher: ScrollWatcher) -> Self {
        Self { surface, watcher }
    }

    /// Every history change scrolls to the newest entry.
    pub fn history_changed(&self) {
        self.surface.scroll_to_bottom(ScrollBehavior::Smooth);
        self.watcher.notify_scroll();
    }

    /// Scroll event from the history element.
    pub fn handle_scroll(&self) {
        self.watcher.notify_scroll();
    }

    /// The jump-to-bottom affordance was activated.
    pub fn jump_to_bottom(&self) {
        self.surface.scroll_to_bottom(ScrollBehavior::Smooth);
        self.watcher.notify_scroll();
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.watcher.is_at_bottom()
    }

    /// Whether the floating jump-to-bottom affordance should be shown.
    #[must_use]
    pub fn show_jump_to_bottom(&self) -> bool {
        !self.is_at_bottom()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.watcher.subscribe()
    }
}
