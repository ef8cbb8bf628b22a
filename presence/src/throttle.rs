//! Fixed-interval, last-value-wins broadcast throttle.
//!
//! DESIGN
//! ======
//! An explicit buffer-and-flush scheduler instead of ad hoc timer
//! callbacks: the caller supplies `Instant`s, so the flush window is
//! driven by a virtual clock in tests and by real time in production.
//! Values offered while the window is closed replace any buffered value
//! (excess updates are dropped, not queued), bounding bandwidth to one
//! broadcast per interval.

#[cfg(test)]
#[path = "throttle_test.rs"]
mod throttle_test;

use std::time::{Duration, Instant};

/// Rate limiter emitting at most one value per interval.
#[derive(Debug)]
pub struct Throttle<T> {
    interval: Duration,
    last_sent: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_sent: None, pending: None }
    }

    /// Offer a value at time `now`. Returns the value to broadcast when the
    /// window is open; otherwise buffers it, replacing any pending value.
    pub fn offer(&mut self, value: T, now: Instant) -> Option<T> {
        if self.ready(now) {
            self.last_sent = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Drain the buffered value once the window has reopened. Call this on
    /// a tick (or before teardown) so the final position is not lost.
    pub fn flush(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.last_sent = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// The buffered value, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_sent.is_none_or(|t| now.duration_since(t) >= self.interval)
    }
}
