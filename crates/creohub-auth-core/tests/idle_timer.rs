//! Idle watchdog timing tests (paused clock)

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use creohub_auth_core::{ActivityEvent, IdleTimer, IdleTimerHandle, SessionConfig};

struct Counters {
    warnings: Arc<AtomicUsize>,
    logouts: Arc<AtomicUsize>,
}

fn start(timer: IdleTimer) -> (IdleTimerHandle, Counters) {
    let warnings = Arc::new(AtomicUsize::new(0));
    let logouts = Arc::new(AtomicUsize::new(0));

    let w = Arc::clone(&warnings);
    let l = Arc::clone(&logouts);
    let handle = timer.spawn(
        move || {
            w.fetch_add(1, Ordering::SeqCst);
        },
        move || {
            l.fetch_add(1, Ordering::SeqCst);
        },
    );
    (handle, Counters { warnings, logouts })
}

async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

async fn advance(d: Duration) {
    tokio::time::advance(d).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_warning_then_logout_once() {
    let (handle, c) = start(IdleTimer::new(&SessionConfig::default()));
    settle().await;

    advance(Duration::from_secs(24 * 60)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 0);

    advance(Duration::from_secs(61)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 1);
    assert_eq!(c.logouts.load(Ordering::SeqCst), 0);

    advance(Duration::from_secs(5 * 60)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 1);
    assert_eq!(c.logouts.load(Ordering::SeqCst), 1);
    assert!(handle.is_finished());

    // Late activity is ignored
    handle.record(ActivityEvent::Click);
    advance(Duration::from_secs(60 * 60)).await;
    assert_eq!(c.logouts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_activity_resets_window() {
    let timer = IdleTimer::from_durations(Duration::from_secs(50), Duration::from_secs(60));
    let (handle, c) = start(timer);
    settle().await;

    for _ in 0..5 {
        advance(Duration::from_secs(40)).await;
        handle.record(ActivityEvent::MouseMove);
        settle().await;
    }
    assert_eq!(c.warnings.load(Ordering::SeqCst), 0);
    assert_eq!(c.logouts.load(Ordering::SeqCst), 0);
    assert!(!handle.is_finished());

    advance(Duration::from_secs(55)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 1);
    advance(Duration::from_secs(6)).await;
    assert_eq!(c.logouts.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_warning_rearms_after_activity() {
    let timer = IdleTimer::from_durations(Duration::from_secs(50), Duration::from_secs(60));
    let (handle, c) = start(timer);
    settle().await;

    advance(Duration::from_secs(55)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 1);

    handle.record(ActivityEvent::KeyPress);
    settle().await;

    advance(Duration::from_secs(55)).await;
    assert_eq!(c.warnings.load(Ordering::SeqCst), 2);
    assert_eq!(c.logouts.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stop_fires_nothing() {
    let timer = IdleTimer::from_durations(Duration::from_secs(5), Duration::from_secs(10));
    let (handle, c) = start(timer);
    settle().await;

    handle.stop();
    advance(Duration::from_secs(60)).await;

    assert_eq!(c.warnings.load(Ordering::SeqCst), 0);
    assert_eq!(c.logouts.load(Ordering::SeqCst), 0);
}
