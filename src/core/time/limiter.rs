//=========================================================================
// Frame Limiter
//=========================================================================
//
// Caps the loop at a target frame rate by blocking, and measures the rate
// that was actually achieved.
//
// Each tick:
//   1. Sleep until 1/max_fps has passed since the previous tick
//   2. Record the interval between the two ticks
//   3. Average the last FPS_SAMPLES intervals into fps()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::TimeSource;

//=== Constants ===========================================================

/// Number of tick intervals averaged into the measured frame rate.
const FPS_SAMPLES: usize = 10;

//=== FrameLimiter ========================================================

/// Blocking frame-rate cap.
///
/// The wait is a plain sleep on the supplied [`TimeSource`]; it cannot be
/// interrupted. A target of `0` disables the cap.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    last_tick: Option<Duration>,
    intervals: VecDeque<Duration>,
    fps: f64,
}

impl FrameLimiter {
    pub fn new() -> Self {
        Self {
            last_tick: None,
            intervals: VecDeque::with_capacity(FPS_SAMPLES),
            fps: 0.0,
        }
    }

    /// Waits out the rest of the frame and returns the interval since the
    /// previous tick (zero on the first tick).
    pub fn tick(&mut self, time: &dyn TimeSource, max_fps: u32) -> Duration {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(time.now());
            return Duration::ZERO;
        };

        //--- Step 1: Hold the frame until the target interval passed -----
        if max_fps > 0 {
            let target = Duration::from_secs_f64(1.0 / f64::from(max_fps));
            let elapsed = time.now().saturating_sub(last);
            if elapsed < target {
                time.sleep(target - elapsed);
            }
        }

        //--- Step 2: Record the achieved interval -------------------------
        let now = time.now();
        let interval = now.saturating_sub(last);
        self.last_tick = Some(now);

        if self.intervals.len() == FPS_SAMPLES {
            self.intervals.pop_front();
        }
        self.intervals.push_back(interval);

        //--- Step 3: Refresh the measured rate ----------------------------
        let total: f64 = self.intervals.iter().map(Duration::as_secs_f64).sum();
        self.fps = if total > 0.0 {
            self.intervals.len() as f64 / total
        } else {
            0.0
        };

        interval
    }

    /// Frames per second averaged over the last ticks.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualTime;
    use approx::assert_relative_eq;

    #[test]
    fn first_tick_does_not_wait() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        let interval = limiter.tick(&time, 30);

        assert_eq!(interval, Duration::ZERO);
        assert_eq!(time.now(), Duration::ZERO);
        assert_eq!(limiter.fps(), 0.0);
    }

    #[test]
    fn sleeps_until_target_interval() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        limiter.tick(&time, 50);
        time.advance(Duration::from_millis(5));
        let interval = limiter.tick(&time, 50);

        assert_eq!(interval, Duration::from_millis(20));
        assert_eq!(time.now(), Duration::from_millis(20));
    }

    #[test]
    fn slow_frames_are_not_delayed_further() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        limiter.tick(&time, 50);
        time.advance(Duration::from_millis(40));
        let interval = limiter.tick(&time, 50);

        assert_eq!(interval, Duration::from_millis(40));
    }

    #[test]
    fn zero_target_disables_the_cap() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        limiter.tick(&time, 0);
        time.advance(Duration::from_millis(1));
        let interval = limiter.tick(&time, 0);

        assert_eq!(interval, Duration::from_millis(1));
    }

    #[test]
    fn fps_matches_capped_rate() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        for _ in 0..25 {
            limiter.tick(&time, 40);
        }

        assert_relative_eq!(limiter.fps(), 40.0, epsilon = 1e-6);
    }

    #[test]
    fn fps_averages_only_recent_intervals() {
        let time = ManualTime::new();
        let mut limiter = FrameLimiter::new();

        limiter.tick(&time, 0);
        for _ in 0..FPS_SAMPLES {
            time.advance(Duration::from_millis(100));
            limiter.tick(&time, 0);
        }
        for _ in 0..FPS_SAMPLES {
            time.advance(Duration::from_millis(10));
            limiter.tick(&time, 0);
        }

        assert_relative_eq!(limiter.fps(), 100.0, epsilon = 1e-6);
    }
}
