use crate::config::ConsoleConfig;
use crate::notification::NotificationChannel;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Process-wide "request in flight" flag.
///
/// Acquiring returns a [`BusyGuard`]; the flag clears when the guard drops,
/// so every exit path of an action (including `?` and panics) releases it.
#[derive(Debug, Clone, Default)]
pub struct BusyIndicator {
    busy: Arc<AtomicBool>,
    acquired: Arc<AtomicU64>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when another action already holds the indicator.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.acquired.fetch_add(1, Ordering::Relaxed);
        Some(BusyGuard {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// How many times the indicator has been raised.
    pub fn times_acquired(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// The two pieces of shared view state every action touches.
#[derive(Debug, Clone)]
pub struct UiState {
    pub busy: BusyIndicator,
    pub notifications: NotificationChannel,
}

impl UiState {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            busy: BusyIndicator::new(),
            notifications: NotificationChannel::new(dismiss_after),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.dismiss_after())
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&ConsoleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_on_drop() {
        let busy = BusyIndicator::new();
        {
            let _guard = busy.try_acquire().unwrap();
            assert!(busy.is_busy());
        }
        assert!(!busy.is_busy());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let busy = BusyIndicator::new();
        let guard = busy.try_acquire().unwrap();
        assert!(busy.try_acquire().is_none());
        drop(guard);
        assert!(busy.try_acquire().is_some());
        assert_eq!(busy.times_acquired(), 2);
    }

    #[test]
    fn clones_share_the_flag() {
        let ui = UiState::default();
        let other = ui.clone();
        let _guard = ui.busy.try_acquire().unwrap();
        assert!(other.busy.is_busy());
    }
}
