//! Clock
//!
//! Monotonic timestamps for measurement cycles, and a spin-wait used to build
//! benchmark bodies of known cost.

use std::time::Duration;

// ─── Instant ─────────────────────────────────────────────────────────────────

/// Monotonic timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant {
    instant: std::time::Instant,
}

impl Instant {
    /// Capture current instant
    #[inline(always)]
    pub fn now() -> Self {
        Self {
            instant: std::time::Instant::now(),
        }
    }

    /// Compute elapsed time since this instant
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Elapsed nanoseconds since this instant, as a float
    #[inline(always)]
    pub fn elapsed_nanos(&self) -> f64 {
        self.elapsed().as_nanos() as f64
    }
}

// ─── Busy wait ───────────────────────────────────────────────────────────────

/// Spin on the CPU until `duration` has elapsed.
///
/// Unlike `thread::sleep` this keeps the thread runnable, so the elapsed time
/// is close to `duration` rather than rounded up to the scheduler tick.
pub fn busy_wait(duration: Duration) {
    let start = Instant::now();
    while start.elapsed() < duration {
        std::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_elapsed() {
        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = start.elapsed();

        // Should be at least 10ms
        assert!(elapsed >= Duration::from_millis(10));
        // Should be less than 100ms (accounting for scheduling)
        assert!(elapsed < Duration::from_millis(100));
    }

    #[test]
    fn test_busy_wait() {
        let start = Instant::now();
        busy_wait(Duration::from_millis(5));
        let nanos = start.elapsed_nanos();

        assert!(nanos >= 5e6);
        assert!(nanos < 50e6);
    }

    #[test]
    fn test_instants_are_ordered() {
        let a = Instant::now();
        let b = Instant::now();
        assert!(b >= a);
    }
}
