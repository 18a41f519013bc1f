//! Debounced "is at bottom" tracking for the history element.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::platform::{ScrollMetrics, ScrollSurface};

/// Distance from the true bottom, in pixels, that still counts as "at bottom".
pub const AT_BOTTOM_THRESHOLD_PX: f64 = 40.0;

/// Quiet period after the last scroll event before measuring.
pub const SCROLL_DEBOUNCE: Duration = Duration::from_millis(100);

impl ScrollMetrics {
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }

    /// Fuzzy bottom check; absorbs sub-pixel and late-layout jitter.
    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        self.distance_from_bottom() <= AT_BOTTOM_THRESHOLD_PX
    }
}

/// One persistent debounced scroll handler.
///
/// Scroll notifications restart a trailing timer; when it fires the surface is
/// measured and the at-bottom flag republished if it changed. Dropping the
/// watcher cancels the task.
#[derive(Debug)]
pub struct ScrollWatcher {
    notify: Arc<Notify>,
    at_bottom: watch::Receiver<bool>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ScrollWatcher {
    /// Spawn with the default 100 ms debounce. Requires a tokio runtime.
    pub fn spawn(surface: Arc<dyn ScrollSurface>) -> Self {
        Self::with_debounce(surface, SCROLL_DEBOUNCE)
    }

    pub fn with_debounce(surface: Arc<dyn ScrollSurface>, debounce: Duration) -> Self {
        let notify = Arc::new(Notify::new());
        let (tx, at_bottom) = watch::channel(true);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(watch_scroll(
            surface,
            Arc::clone(&notify),
            tx,
            cancel.clone(),
            debounce,
        ));

        Self {
            notify,
            at_bottom,
            cancel,
            task,
        }
    }

    /// Record a scroll event. Cheap; safe to call at any rate.
    pub fn notify_scroll(&self) {
        self.notify.notify_one();
    }

    #[must_use]
    pub fn is_at_bottom(&self) -> bool {
        *self.at_bottom.borrow()
    }

    /// Follow at-bottom changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.at_bottom.clone()
    }
}

impl Drop for ScrollWatcher {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

async fn watch_scroll(
    surface: Arc<dyn ScrollSurface>,
    notify: Arc<Notify>,
    at_bottom: watch::Sender<bool>,
    cancel: CancellationToken,
    debounce: Duration,
) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => return,
            () = notify.notified() => {},
        }

        loop {
            tokio::select! {
                () = cancel.cancelled() => return,
                () = notify.notified() => {},
                () = tokio::time::sleep(debounce) => break,
            }
        }

        let Some(metrics) = surface.metrics() else {
            continue;
        };
        let is_bottom = metrics.is_at_bottom();
        trace!(
            name: "embed.history.scroll_measured",
            distance = metrics.distance_from_bottom(),
            at_bottom = is_bottom,
            "Measured chat history scroll position"
        );
        at_bottom.send_if_modified(|current| {
            let changed = *current != is_bottom;
            *current = is_bottom;
            changed
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(distance: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_height: 1000.0,
            scroll_top: 1000.0 - 400.0 - distance,
            client_height: 400.0,
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(metrics(0.0).is_at_bottom());
        assert!(metrics(40.0).is_at_bottom());
        assert!(!metrics(40.5).is_at_bottom());
        assert!(!metrics(300.0).is_at_bottom());
    }
}
