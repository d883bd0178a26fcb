//! Control state for automatic shelf emptying.
//!
//! The dashboard can switch on a timer that calls `simulate_empty` every
//! few seconds. This module holds the shared switch and interval; the
//! engine owns the loop that reads them.
//!
//! # Architecture
//!
//! Fields are atomics so the loop and the HTTP handlers share them
//! without a lock. Changing either field wakes the loop through a
//! [`Notify`] so a new interval takes effect immediately. Writing the value
//! a field already holds is not a change and wakes nobody.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use smartstore_types::AutoSimulateStatus;
use tokio::sync::Notify;

/// Shortest accepted interval in seconds.
pub const MIN_INTERVAL_SECONDS: u64 = 1;

/// Longest accepted interval in seconds.
pub const MAX_INTERVAL_SECONDS: u64 = 10;

/// Interval used when none is configured.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 3;

/// Shared auto-simulation switch.
#[derive(Debug)]
pub struct AutoSimulateControl {
    enabled: AtomicBool,
    interval_seconds: AtomicU64,
    changed: Notify,
}

impl AutoSimulateControl {
    /// Create the control block. An out-of-range interval is clamped.
    pub fn new(enabled: bool, interval_seconds: u64) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            interval_seconds: AtomicU64::new(
                interval_seconds.clamp(MIN_INTERVAL_SECONDS, MAX_INTERVAL_SECONDS),
            ),
            changed: Notify::new(),
        }
    }

    /// Whether the timer is running.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Switch the timer on or off.
    ///
    /// The loop is woken only if the switch actually flipped.
    pub fn set_enabled(&self, enabled: bool) {
        let prev = self.enabled.swap(enabled, Ordering::AcqRel);
        if prev != enabled {
            self.changed.notify_one();
        }
    }

    /// Seconds between automatic empties.
    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds.load(Ordering::Acquire)
    }

    /// The interval as a [`Duration`].
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds())
    }

    /// Set the interval.
    ///
    /// Returns the previous interval, or `None` if `seconds` is outside
    /// `1..=10` (the value is then left unchanged).
    pub fn set_interval_seconds(&self, seconds: u64) -> Option<u64> {
        if !(MIN_INTERVAL_SECONDS..=MAX_INTERVAL_SECONDS).contains(&seconds) {
            return None;
        }
        let prev = self.interval_seconds.swap(seconds, Ordering::AcqRel);
        if prev != seconds {
            self.changed.notify_one();
        }
        Some(prev)
    }

    /// Wait until the switch or interval changes.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    /// Wait until the timer is switched on.
    ///
    /// Returns immediately if it already is.
    pub async fn wait_until_enabled(&self) {
        while !self.is_enabled() {
            self.changed.notified().await;
        }
    }

    /// Snapshot for the API.
    pub fn status(&self) -> AutoSimulateStatus {
        AutoSimulateStatus {
            enabled: self.is_enabled(),
            interval_seconds: self.interval_seconds(),
        }
    }
}

impl Default for AutoSimulateControl {
    fn default() -> Self {
        Self::new(false, DEFAULT_INTERVAL_SECONDS)
    }
}
