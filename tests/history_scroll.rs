use std::sync::Arc;
use std::time::Duration;

use embed_widget::history::{AT_BOTTOM_THRESHOLD_PX, ChatHistoryController, ScrollWatcher};
use embed_widget::platform::{HeadlessScrollSurface, ScrollBehavior, ScrollMetrics, ScrollSurface};

fn scrolled_up(distance: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_height: 2000.0,
        scroll_top: 2000.0 - 500.0 - distance,
        client_height: 500.0,
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

#[tokio::test(start_paused = true)]
async fn test_scroll_burst_is_measured_once() {
    let surface = Arc::new(HeadlessScrollSurface::with_metrics(scrolled_up(300.0)));
    let controller = ChatHistoryController::new(Arc::clone(&surface) as Arc<dyn ScrollSurface>);

    for _ in 0..5 {
        controller.handle_scroll();
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    assert_eq!(surface.measurements(), 0, "debounce still pending");

    settle().await;
    assert_eq!(surface.measurements(), 1);
    assert!(!controller.is_at_bottom());
    assert!(controller.show_jump_to_bottom());
}

#[tokio::test(start_paused = true)]
async fn test_threshold_absorbs_small_offsets() {
    let surface = Arc::new(HeadlessScrollSurface::with_metrics(scrolled_up(
        AT_BOTTOM_THRESHOLD_PX,
    )));
    let controller = ChatHistoryController::new(Arc::clone(&surface) as Arc<dyn ScrollSurface>);

    controller.handle_scroll();
    settle().await;
    assert!(controller.is_at_bottom());

    surface.set_metrics(scrolled_up(AT_BOTTOM_THRESHOLD_PX + 1.0));
    controller.handle_scroll();
    settle().await;
    assert!(controller.show_jump_to_bottom());
}

#[tokio::test(start_paused = true)]
async fn test_jump_to_bottom_hides_affordance() {
    let surface = Arc::new(HeadlessScrollSurface::with_metrics(scrolled_up(800.0)));
    let controller = ChatHistoryController::new(Arc::clone(&surface) as Arc<dyn ScrollSurface>);
    let mut rx = controller.subscribe();

    controller.handle_scroll();
    settle().await;
    assert!(rx.has_changed().unwrap());
    assert!(!*rx.borrow_and_update());

    controller.jump_to_bottom();
    settle().await;
    assert!(*rx.borrow_and_update());
    assert!(!controller.show_jump_to_bottom());
    assert_eq!(surface.scroll_requests(), vec![ScrollBehavior::Smooth]);
}

#[tokio::test(start_paused = true)]
async fn test_history_change_scrolls_smoothly() {
    let surface = Arc::new(HeadlessScrollSurface::with_metrics(scrolled_up(120.0)));
    let controller = ChatHistoryController::new(Arc::clone(&surface) as Arc<dyn ScrollSurface>);

    controller.history_changed();
    controller.history_changed();
    settle().await;

    assert_eq!(
        surface.scroll_requests(),
        vec![ScrollBehavior::Smooth, ScrollBehavior::Smooth]
    );
    assert_eq!(surface.measurements(), 1);
    assert!(controller.is_at_bottom());
}

#[tokio::test(start_paused = true)]
async fn test_unmeasurable_surface_keeps_last_value() {
    let surface = Arc::new(HeadlessScrollSurface::new());
    let watcher = ScrollWatcher::spawn(Arc::clone(&surface) as Arc<dyn ScrollSurface>);

    watcher.notify_scroll();
    settle().await;
    assert_eq!(surface.measurements(), 1);
    assert!(watcher.is_at_bottom());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_watcher_stops_task() {
    let surface = Arc::new(HeadlessScrollSurface::with_metrics(scrolled_up(300.0)));
    let watcher = ScrollWatcher::with_debounce(
        Arc::clone(&surface) as Arc<dyn ScrollSurface>,
        Duration::from_millis(10),
    );
    let mut rx = watcher.subscribe();

    watcher.notify_scroll();
    drop(watcher);

    let closed = tokio::time::timeout(Duration::from_secs(1), rx.changed()).await;
    assert!(matches!(closed, Ok(Err(_))), "sender should be dropped with the task");
    assert_eq!(surface.measurements(), 0);
}
