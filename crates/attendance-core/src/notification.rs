//! Single-slot notification channel.
//!
//! At most one notification is visible. Publishing replaces whatever is
//! showing and re-arms the auto-dismiss timer; the replaced event is dropped,
//! not queued.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "i",
            Severity::Success => "✓",
            Severity::Warning => "!",
            Severity::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationChannel
// ---------------------------------------------------------------------------

struct Visible {
    id: u64,
    event: NotificationEvent,
    timer: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct Slot {
    current: Option<Visible>,
    next_id: u64,
}

impl Slot {
    fn clear(&mut self) -> Option<NotificationEvent> {
        let visible = self.current.take()?;
        if let Some(timer) = visible.timer {
            timer.abort();
        }
        Some(visible.event)
    }
}

/// Cheap to clone; clones share the same visible slot.
#[derive(Clone)]
pub struct NotificationChannel {
    slot: Arc<Mutex<Slot>>,
    dismiss_after: Duration,
    tx: broadcast::Sender<NotificationEvent>,
}

impl NotificationChannel {
    pub fn new(dismiss_after: Duration) -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            dismiss_after,
            tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A panic while holding the lock leaves the slot in a valid state.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Show `event`, replacing anything visible. Returns the id of the new
    /// notification.
    ///
    /// Auto-dismiss needs a Tokio runtime; outside one the notification stays
    /// until replaced or dismissed.
    pub fn publish(&self, event: NotificationEvent) -> u64 {
        let mut slot = self.lock();
        slot.clear();
        slot.next_id += 1;
        let id = slot.next_id;

        let timer = if tokio::runtime::Handle::try_current().is_ok() {
            let shared = Arc::clone(&self.slot);
            let delay = self.dismiss_after;
            Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let mut slot = shared.lock().unwrap_or_else(|e| e.into_inner());
                if slot.current.as_ref().is_some_and(|v| v.id == id) {
                    slot.current = None;
                    tracing::debug!(id, "notification auto-dismissed");
                }
            }))
        } else {
            None
        };

        match event.severity {
            Severity::Error => tracing::error!(message = %event.message, "notification"),
            Severity::Warning => tracing::warn!(message = %event.message, "notification"),
            _ => tracing::info!(message = %event.message, "notification"),
        }

        // No subscribers is fine.
        let _ = self.tx.send(event.clone());
        slot.current = Some(Visible { id, event, timer });
        id
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) -> u64 {
        self.publish(NotificationEvent::new(severity, message))
    }

    /// Explicit early dismissal. Cancels the pending auto-dismiss.
    pub fn dismiss(&self) -> Option<NotificationEvent> {
        self.lock().clear()
    }

    pub fn current(&self) -> Option<NotificationEvent> {
        self.lock().current.as_ref().map(|v| v.event.clone())
    }

    pub fn current_id(&self) -> Option<u64> {
        self.lock().current.as_ref().map(|v| v.id)
    }

    /// Total notifications published so far.
    pub fn published_count(&self) -> u64 {
        self.lock().next_id
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.tx.subscribe()
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("dismiss_after", &self.dismiss_after)
            .field("current", &self.current())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> NotificationChannel {
        NotificationChannel::new(Duration::from_secs(5))
    }

    #[test]
    fn publish_without_runtime_stays_visible() {
        let ch = channel();
        ch.notify(Severity::Info, "hello");
        assert_eq!(ch.current().unwrap().message, "hello");
        assert_eq!(ch.published_count(), 1);
    }

    #[test]
    fn newer_replaces_older() {
        let ch = channel();
        let first = ch.notify(Severity::Warning, "first");
        let second = ch.notify(Severity::Success, "second");
        assert_ne!(first, second);
        let current = ch.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Success);
        assert_eq!(ch.current_id(), Some(second));
    }

    #[test]
    fn dismiss_returns_and_clears() {
        let ch = channel();
        ch.notify(Severity::Error, "boom");
        assert_eq!(ch.dismiss().unwrap().message, "boom");
        assert!(ch.current().is_none());
        assert!(ch.dismiss().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn auto_dismiss_after_delay() {
        let ch = channel();
        ch.notify(Severity::Success, "saved");
        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(ch.current().is_some());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(ch.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_cancels_earlier_timer() {
        let ch = channel();
        ch.notify(Severity::Info, "first");
        tokio::time::sleep(Duration::from_secs(3)).await;
        ch.notify(Severity::Info, "second");

        // The first timer would have fired at t=5s.
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(ch.current().unwrap().message, "second");

        // The second fires at t=8s.
        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert!(ch.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn early_dismiss_then_publish_is_not_cut_short() {
        let ch = channel();
        ch.notify(Severity::Info, "first");
        tokio::time::sleep(Duration::from_secs(4)).await;
        ch.dismiss();
        ch.notify(Severity::Info, "second");
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(ch.current().unwrap().message, "second");
    }

    #[tokio::test]
    async fn subscribers_see_every_event() {
        let ch = channel();
        let mut rx = ch.subscribe();
        ch.notify(Severity::Warning, "one");
        ch.notify(Severity::Error, "two");
        assert_eq!(rx.recv().await.unwrap().message, "one");
        assert_eq!(rx.recv().await.unwrap().message, "two");
    }
}
