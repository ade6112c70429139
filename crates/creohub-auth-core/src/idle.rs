//! Idle-timeout watchdog
//!
//! Mirrors the server session timeout for an interactive client: every
//! recorded activity event restarts the window, a warning fires once per
//! window at `timeout - warning_lead`, and the logout callback fires once at
//! `timeout`. Advisory only; the server may expire the session on its own.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::SessionConfig;

/// User interaction that counts as activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityEvent {
    MouseDown,
    MouseMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

impl ActivityEvent {
    /// Every event the watchdog listens for
    pub const ALL: [ActivityEvent; 6] = [
        Self::MouseDown,
        Self::MouseMove,
        Self::KeyPress,
        Self::Scroll,
        Self::TouchStart,
        Self::Click,
    ];

    /// DOM event name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::KeyPress => "keypress",
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
            Self::Click => "click",
        }
    }

    /// Parse a DOM event name; anything else is not activity
    pub fn from_dom_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

/// Idle watchdog configuration
#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    warning_after: Duration,
    timeout: Duration,
}

impl IdleTimer {
    /// Build from the session configuration
    pub fn new(config: &SessionConfig) -> Self {
        Self::from_durations(config.warning_after(), config.timeout)
    }

    /// Build from explicit durations
    pub fn from_durations(warning_after: Duration, timeout: Duration) -> Self {
        Self {
            warning_after: warning_after.min(timeout),
            timeout,
        }
    }

    /// Start the watchdog on the current Tokio runtime
    pub fn spawn<W, L>(self, on_warning: W, on_logout: L) -> IdleTimerHandle
    where
        W: Fn() + Send + 'static,
        L: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(rx, on_warning, on_logout));
        IdleTimerHandle { activity: tx, task }
    }

    async fn run<W, L>(self, mut rx: mpsc::UnboundedReceiver<ActivityEvent>, on_warning: W, on_logout: L)
    where
        W: Fn(),
        L: FnOnce(),
    {
        let mut on_logout = Some(on_logout);
        let mut window_start = Instant::now();
        let mut warned = false;

        loop {
            let warn_at = window_start + self.warning_after;
            let logout_at = window_start + self.timeout;

            tokio::select! {
                event = rx.recv() => match event {
                    Some(_) => {
                        window_start = Instant::now();
                        warned = false;
                    }
                    // Handle dropped: the client went away
                    None => return,
                },
                _ = sleep_until(warn_at), if !warned => {
                    warned = true;
                    tracing::debug!("Idle warning");
                    on_warning();
                }
                _ = sleep_until(logout_at) => {
                    tracing::debug!("Idle timeout reached, logging out");
                    if let Some(logout) = on_logout.take() {
                        logout();
                    }
                    return;
                }
            }
        }
    }
}

/// Handle to a running idle watchdog
#[derive(Debug)]
pub struct IdleTimerHandle {
    activity: mpsc::UnboundedSender<ActivityEvent>,
    task: JoinHandle<()>,
}

impl IdleTimerHandle {
    /// Record user activity, restarting the idle window
    pub fn record(&self, event: ActivityEvent) {
        // After logout the receiver is gone; late events are irrelevant.
        let _ = self.activity.send(event);
    }

    /// Whether the watchdog has finished (logged out or stopped)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the watchdog without firing any callback
    pub fn stop(self) {
        self.task.abort();
    }
}
