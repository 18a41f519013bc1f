//! Browser capabilities the widget needs, behind traits.
//!
//! The widget never touches a global `window`: event dispatch, key/value
//! storage and the scrollable history element are handed to it at the
//! composition root. [`HeadlessPlatform`] and [`HeadlessScrollSurface`] are
//! in-memory implementations used for server-side previews and tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::json;

/// Name of the event that forwards a suggested message to the send pathway.
pub const SEND_TEXT_EVENT: &str = "anythingllm-embed-send-prompt";

/// A widget-scoped custom event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetEvent {
    /// Event name.
    pub name: &'static str,
    /// Event detail payload.
    pub detail: serde_json::Value,
}

impl WidgetEvent {
    /// Ask the input/send pathway to send `command` as a user message.
    pub fn send_text(command: impl Into<String>) -> Self {
        Self {
            name: SEND_TEXT_EVENT,
            detail: json!({ "command": command.into() }),
        }
    }

    /// The `command` carried by a send-text event.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.detail.get("command").and_then(serde_json::Value::as_str)
    }
}

/// Host page capabilities.
pub trait Platform: Send + Sync + fmt::Debug {
    /// Dispatch a custom event on the widget's event target.
    fn dispatch_event(&self, event: WidgetEvent);

    /// Read a value from the browser-scoped key/value store.
    fn storage_get(&self, key: &str) -> Option<String>;

    /// Write a value to the browser-scoped key/value store.
    fn storage_set(&self, key: &str, value: &str);
}

/// Scroll position of the history element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

/// How a programmatic scroll animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The scrollable chat history element.
pub trait ScrollSurface: Send + Sync + fmt::Debug {
    /// Current measurements, or `None` while the element is not mounted.
    fn metrics(&self) -> Option<ScrollMetrics>;

    /// Scroll to the end of the content.
    fn scroll_to_bottom(&self, behavior: ScrollBehavior);
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`Platform`] that records dispatched events.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    events: Mutex<Vec<WidgetEvent>>,
    storage: Mutex<HashMap<String, String>>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events dispatched so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<WidgetEvent> {
        lock(&self.events).clone()
    }
}

impl Platform for HeadlessPlatform {
    fn dispatch_event(&self, event: WidgetEvent) {
        lock(&self.events).push(event);
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        lock(&self.storage).get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) {
        lock(&self.storage).insert(key.to_string(), value.to_string());
    }
}

/// In-memory [`ScrollSurface`] with settable metrics.
#[derive(Debug, Default)]
pub struct HeadlessScrollSurface {
    metrics: Mutex<Option<ScrollMetrics>>,
    measurements: AtomicUsize,
    scroll_requests: Mutex<Vec<ScrollBehavior>>,
}

impl HeadlessScrollSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that reports the given metrics.
    pub fn with_metrics(metrics: ScrollMetrics) -> Self {
        let surface = Self::default();
        surface.set_metrics(metrics);
        surface
    }

    /// Simulate the user scrolling or the content resizing.
    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        *lock(&self.metrics) = Some(metrics);
    }

    /// How many times the surface was measured.
    #[must_use]
    pub fn measurements(&self) -> usize {
        self.measurements.load(Ordering::SeqCst)
    }

    /// Programmatic scroll requests received, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<ScrollBehavior> {
        lock(&self.scroll_requests).clone()
    }
}

impl ScrollSurface for HeadlessScrollSurface {
    fn metrics(&self) -> Option<ScrollMetrics> {
        self.measurements.fetch_add(1, Ordering::SeqCst);
        *lock(&self.metrics)
    }

    fn scroll_to_bottom(&self, behavior: ScrollBehavior) {
        lock(&self.scroll_requests).push(behavior);
        if let Some(metrics) = lock(&self.metrics).as_mut() {
            metrics.scroll_top = (metrics.scroll_height - metrics.client_height).max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_text_event_payload() {
        let event = WidgetEvent::send_text("What can you do?");
        assert_eq!(event.name, SEND_TEXT_EVENT);
        assert_eq!(event.command(), Some("What can you do?"));
        assert_eq!(event.detail, json!({ "command": "What can you do?" }));
    }

    #[test]
    fn test_headless_storage_round_trip() {
        let platform = HeadlessPlatform::new();
        assert!(platform.storage_get("k").is_none());
        platform.storage_set("k", "v");
        assert_eq!(platform.storage_get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_headless_scroll_to_bottom_moves_offset() {
        let surface = HeadlessScrollSurface::with_metrics(ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 0.0,
            client_height: 400.0,
        });
        surface.scroll_to_bottom(ScrollBehavior::Smooth);
        assert_eq!(surface.scroll_requests(), vec![ScrollBehavior::Smooth]);
        let metrics = surface.metrics().unwrap();
        assert!((metrics.scroll_top - 600.0).abs() < f64::EPSILON);
    }
}
