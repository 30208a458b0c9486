//=========================================================================
// Time Sources
//=========================================================================
//
// Abstracts "what time is it" and "wait this long" so the clock can run
// against the real monotonic clock or a manually driven one in tests.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

//=== TimeSource ==========================================================

/// Monotonic time plus a blocking wait.
pub trait TimeSource {
    /// Time elapsed since the source's origin.
    fn now(&self) -> Duration;

    /// Blocks for `duration`.
    fn sleep(&self, duration: Duration);
}

//=== MonotonicTime =======================================================

/// Real time backed by [`Instant`] and [`thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

//=== ManualTime ==========================================================

/// Time that only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and give another to a [`Clock`](super::Clock). Sleeping advances the time
/// by exactly the requested duration and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Moves time forward by a number of seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_time_never_goes_backwards() {
        let time = MonotonicTime::new();
        let first = time.now();
        let second = time.now();
        assert!(second >= first);
    }

    #[test]
    fn monotonic_sleep_blocks_at_least_the_duration() {
        let time = MonotonicTime::new();
        let before = time.now();
        time.sleep(Duration::from_millis(5));
        assert!(time.now() - before >= Duration::from_millis(5));
    }

    #[test]
    fn manual_time_starts_at_zero() {
        assert_eq!(ManualTime::new().now(), Duration::ZERO);
    }

    #[test]
    fn manual_time_clones_share_state() {
        let time = ManualTime::new();
        let handle = time.clone();

        handle.advance(Duration::from_millis(250));

        assert_eq!(time.now(), Duration::from_millis(250));
    }

    #[test]
    fn manual_sleep_advances_time() {
        let time = ManualTime::new();
        time.sleep(Duration::from_secs(2));
        assert_eq!(time.now(), Duration::from_secs(2));
    }
}
