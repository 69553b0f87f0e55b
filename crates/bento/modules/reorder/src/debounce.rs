//! Clock-driven debouncer holding at most one pending value.

use core::time::Duration;
use std::time::Instant;

/// Single-slot debouncer driven by an external clock.
///
/// Each [`schedule`](Self::schedule) replaces the pending value and restarts
/// the quiet period, so at most one value is ever pending. The host polls with
/// the current time; the value is released once the quiet period has elapsed
/// since the most recent `schedule`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    /// How long the input must stay quiet before the pending value is released.
    quiet: Duration,
    /// Latest value and the instant it becomes due.
    pending: Option<(T, Instant)>,
    /// Number of times a pending value was replaced before it became due.
    superseded: u64,
}

impl<T> Debouncer<T> {
    /// Creates a debouncer with the given quiet period.
    #[inline]
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            superseded: 0,
        }
    }

    /// Arms (or re-arms) the timer with `value`, due `quiet` after `now`.
    #[inline]
    pub fn schedule(&mut self, value: T, now: Instant) {
        if self.pending.is_some() {
            self.superseded = self.superseded.saturating_add(1);
        }
        self.pending = Some((value, now + self.quiet));
    }

    /// Releases the pending value if its quiet period has elapsed by `now`.
    #[inline]
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, due)) if now >= due => Some(value),
            still_pending => {
                self.pending = still_pending;
                None
            }
        }
    }

    /// Drops any pending value without releasing it.
    #[inline]
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Instant at which the pending value becomes due.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|&(_, due)| due)
    }

    /// Whether a value is waiting.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns how many pending values were superseded since creation.
    #[inline]
    #[must_use]
    pub const fn superseded(&self) -> u64 {
        self.superseded
    }
}
