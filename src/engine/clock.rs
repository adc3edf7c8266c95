//! Tick cadence tracking.
//!
//! The engine owns no timer. A driver (UI shell, wasm host, or test) holds
//! a [`TickClock`] and asks it how many ticks have come due for a given
//! elapsed wall-clock duration, then calls `SimEngine::tick` that many
//! times. Tests skip the clock entirely and call `tick` directly, which is
//! what makes the engine deterministic and timer-free.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cadence between ticks, matching the source visualization.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Fixed-interval tick accounting.
///
/// The interval is independent of batch size: batch size sets throughput
/// per tick, the interval sets how often ticks fire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickClock {
    /// Interval between ticks in nanoseconds.
    interval_nanos: u64,
    /// Ticks already reported as due.
    delivered: u64,
}

impl TickClock {
    /// Create a clock with the given interval in milliseconds.
    ///
    /// A zero interval is clamped to 1ms.
    #[must_use]
    pub const fn from_millis(interval_ms: u64) -> Self {
        let ms = if interval_ms == 0 { 1 } else { interval_ms };
        Self {
            interval_nanos: ms * 1_000_000,
            delivered: 0,
        }
    }

    /// Interval between ticks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_nanos(self.interval_nanos)
    }

    /// Ticks reported as due so far.
    #[must_use]
    pub const fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Number of ticks newly due at `elapsed` time since the run started.
    ///
    /// Successive calls with non-decreasing `elapsed` never report the same
    /// tick twice; a regressing `elapsed` reports zero.
    pub fn due_ticks(&mut self, elapsed: Duration) -> u64 {
        let total = (elapsed.as_nanos() / u128::from(self.interval_nanos)) as u64;
        let due = total.saturating_sub(self.delivered);
        self.delivered = total.max(self.delivered);
        due
    }

    /// Rewind to zero, dropping any pending ticks.
    ///
    /// Called on engine reset so a tick computed before the reset cannot be
    /// delivered after it.
    pub fn reset(&mut self) {
        self.delivered = 0;
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TICK_INTERVAL_MS)
    }
}
