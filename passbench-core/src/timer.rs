//! Timer
//!
//! The capability handed to a benchmark body for one measurement cycle.
//!
//! The cycle owns a start timestamp and lends it to the `Timer` for the
//! duration of the body call. Calling [`Timer::start`] overwrites that
//! timestamp, so everything the body did before the call is excluded from the
//! measurement. Only the most recent call matters.

use crate::measure::Instant;

/// Iteration count and deferred-start control for one measurement cycle
#[derive(Debug)]
pub struct Timer<'a> {
    iterations: u64,
    start: &'a mut Instant,
}

impl<'a> Timer<'a> {
    pub(crate) fn new(iterations: u64, start: &'a mut Instant) -> Self {
        Self { iterations, start }
    }

    /// Number of iterations the body should run
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Restart the measurement from now.
    ///
    /// The clock starts automatically before the body is invoked; call this
    /// after any setup that should not be timed.
    #[inline]
    pub fn start(&mut self) {
        *self.start = Instant::now();
    }
}
