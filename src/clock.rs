//! Monotonic time sources
//!
//! The logic thread only ever asks for "seconds since some fixed epoch", so
//! the real clock and the test clock share one small trait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A monotonic time source in floating-point seconds
pub trait Clock: Send + Sync {
    /// Seconds since this clock's epoch. Never decreases.
    fn now(&self) -> f64;

    /// Seconds elapsed since `prev`
    fn delta(&self, prev: f64) -> f64 {
        self.now() - prev
    }
}

/// Wall clock backed by `Instant`, epoch fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            bits: AtomicU64::new(start.to_bits()),
        }
    }

    /// Jump to `time`; earlier values are ignored to stay monotonic
    pub fn set(&self, time: f64) {
        let _ = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                (time > f64::from_bits(bits)).then(|| time.to_bits())
            });
    }

    pub fn advance(&self, secs: f64) {
        self.set(self.now() + secs.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
