//=========================================================================
// Clock
//=========================================================================
//
// Per-frame bookkeeping for the window loop.
//
// tick():
//   1. Push the last frame's work duration into the fixed history
//   2. Refresh smoothed durations (throttled to STATS_INTERVAL)
//   3. Block in the frame limiter until the target frame time passed
//   4. Compute delta time (raw seconds and frame-normalized)
//   5. Start timing the next frame
//
// delta_time is the raw delta scaled by max_fps * speed_factor, so it is
// ~1.0 per frame when running at the target rate.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::{FrameLimiter, MonotonicTime, TimeSource};

//=== Constants ===========================================================

/// Default length of the frame-duration history.
pub const DEFAULT_HISTORY_LEN: usize = 90;

/// Minimum seconds between two recomputations of the smoothed durations.
const STATS_INTERVAL: f64 = 0.2;

/// Newest history entries averaged into the short duration.
const SHORT_WINDOW: usize = 5;

/// Largest history entries averaged into the low-percentile duration.
const LOW_SAMPLES: usize = 3;

//=== Clock ===============================================================

/// Frame timer, rate limiter and fps statistics.
pub struct Clock {
    time: Box<dyn TimeSource>,
    limiter: FrameLimiter,
    max_fps: u32,
    speed_factor: f64,

    //--- Statistics -------------------------------------------------------
    frame_count: u64,
    frame_start: Duration,
    frame_durations: VecDeque<f64>,
    frame_duration: f64,
    frame_duration_low: f64,
    frame_duration_lazy: f64,
    last_update: Option<Duration>,

    //--- Delta time -------------------------------------------------------
    delta_time_raw: f64,
    delta_time: f64,
    last_time: Option<Duration>,
}

impl Clock {
    //--- Construction -----------------------------------------------------

    /// Creates a clock on the real monotonic time with the default history.
    pub fn new(max_fps: u32) -> Self {
        Self::with_time_source(max_fps, DEFAULT_HISTORY_LEN, Box::new(MonotonicTime::new()))
    }

    /// Creates a clock with an explicit history length and time source.
    ///
    /// # Panics
    ///
    /// Panics if `max_fps == 0` or `history_len < 5`.
    pub fn with_time_source(max_fps: u32, history_len: usize, time: Box<dyn TimeSource>) -> Self {
        assert!(max_fps > 0, "max fps must be positive");
        assert!(
            history_len >= SHORT_WINDOW,
            "frame history must hold at least {} entries, got {}",
            SHORT_WINDOW,
            history_len
        );

        let frame_start = time.now();
        Self {
            time,
            limiter: FrameLimiter::new(),
            max_fps,
            speed_factor: 1.0,
            frame_count: 0,
            frame_start,
            frame_durations: VecDeque::from(vec![0.0; history_len]),
            frame_duration: 1.0,
            frame_duration_low: 1.0,
            frame_duration_lazy: 1.0,
            last_update: None,
            delta_time_raw: 0.0,
            delta_time: 0.0,
            last_time: None,
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Advances to the next frame.
    ///
    /// `max_fps` replaces the target rate before limiting; `Some(0)` is
    /// rejected and the previous target kept.
    pub fn tick(&mut self, max_fps: Option<u32>) {
        //--- Step 1: Record the finished frame ---------------------------
        let frame_end = self.time.now();
        let duration = frame_end.saturating_sub(self.frame_start).as_secs_f64();
        self.frame_durations.pop_front();
        self.frame_durations.push_back(duration);

        //--- Step 2: Refresh smoothed durations --------------------------
        let due = self
            .last_update
            .map_or(true, |last| frame_end.saturating_sub(last).as_secs_f64() > STATS_INTERVAL);
        if due {
            self.refresh_statistics();
            self.last_update = Some(self.time.now());
        }

        //--- Step 3: Limit the frame rate ---------------------------------
        match max_fps {
            Some(0) => warn!(target: "clock", "Ignoring max fps of 0, keeping {}", self.max_fps),
            Some(fps) => self.max_fps = fps,
            None => {}
        }
        self.limiter.tick(self.time.as_ref(), self.max_fps);

        //--- Step 4: Delta time -------------------------------------------
        let now = self.time.now();
        self.delta_time_raw = match self.last_time {
            Some(last) => now.saturating_sub(last).as_secs_f64(),
            None => 1.0 / f64::from(self.max_fps),
        };
        self.last_time = Some(now);
        self.delta_time = self.delta_time_raw * f64::from(self.max_fps) * self.speed_factor;

        //--- Step 5: Start the next frame ---------------------------------
        self.frame_count += 1;
        self.frame_start = self.time.now();

        trace!(
            target: "clock",
            "Frame {} (dt {:.4}, raw {:.6}s)",
            self.frame_count,
            self.delta_time,
            self.delta_time_raw
        );
    }

    /// Forgets the previous tick so the next one starts a fresh session.
    ///
    /// The next [`Clock::tick`] falls back to the target interval for its
    /// delta time and the limiter does not wait out the idle gap. The frame
    /// count and the duration history are kept.
    pub fn reset(&mut self) {
        self.limiter = FrameLimiter::new();
        self.last_time = None;
        self.last_update = None;
        self.frame_start = self.time.now();
    }

    fn refresh_statistics(&mut self) {
        let short: f64 = self.frame_durations.iter().rev().take(SHORT_WINDOW).sum();
        self.frame_duration = non_zero(short / SHORT_WINDOW as f64);

        let mut sorted: Vec<f64> = self.frame_durations.iter().copied().collect();
        sorted.sort_by(|a, b| b.total_cmp(a));
        let low: f64 = sorted.iter().take(LOW_SAMPLES).sum();
        self.frame_duration_low = non_zero(low / LOW_SAMPLES as f64);

        let lazy: f64 = self.frame_durations.iter().sum();
        self.frame_duration_lazy = non_zero(lazy / self.frame_durations.len() as f64);
    }

    //--- Fps Readouts -----------------------------------------------------

    /// Frame rate actually achieved, as measured by the limiter.
    pub fn real_fps(&self) -> f64 {
        round5(self.limiter.fps())
    }

    /// Frame rate the work of the recent frames would allow.
    pub fn available_fps(&self) -> f64 {
        round5(1.0 / self.frame_duration)
    }

    /// Frame rate the slowest frames in the history would allow.
    pub fn available_fps_low(&self) -> f64 {
        round5(1.0 / self.frame_duration_low)
    }

    /// Frame rate averaged over the full history.
    pub fn available_fps_lazy(&self) -> f64 {
        round5(1.0 / self.frame_duration_lazy)
    }

    //--- Accessors --------------------------------------------------------

    pub fn max_fps(&self) -> u32 {
        self.max_fps
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Scales [`Clock::delta_time`]; `2.0` runs the simulation twice as fast.
    pub fn set_speed_factor(&mut self, speed_factor: f64) {
        self.speed_factor = speed_factor;
    }

    /// Frame-normalized delta time (~1.0 at the target rate).
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Seconds since the previous tick.
    pub fn delta_time_raw(&self) -> f64 {
        self.delta_time_raw
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Work durations of the recent frames in seconds, oldest first.
    pub fn frame_durations(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.frame_durations.iter().copied()
    }

    /// Work duration of the most recent frame in seconds.
    pub fn last_frame_duration(&self) -> f64 {
        self.frame_durations.back().copied().unwrap_or(0.0)
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clock")
            .field("max_fps", &self.max_fps)
            .field("speed_factor", &self.speed_factor)
            .field("frame_count", &self.frame_count)
            .field("delta_time", &self.delta_time)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clock[real_fps={}, available_fps={}, max_fps={}, speed_factor={}, frame_count={}]",
            self.real_fps(),
            self.available_fps(),
            self.max_fps,
            self.speed_factor,
            self.frame_count
        )
    }
}

//--- Helpers -------------------------------------------------------------

fn non_zero(duration: f64) -> f64 {
    if duration == 0.0 {
        1.0
    } else {
        duration
    }
}

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::ManualTime;
    use approx::assert_relative_eq;

    fn manual_clock(max_fps: u32, history_len: usize) -> (Clock, ManualTime) {
        let time = ManualTime::new();
        let clock = Clock::with_time_source(max_fps, history_len, Box::new(time.clone()));
        (clock, time)
    }

    //--- Delta Time ------------------------------------------------------

    #[test]
    fn first_tick_falls_back_to_target_interval() {
        let (mut clock, _time) = manual_clock(60, DEFAULT_HISTORY_LEN);

        clock.tick(None);

        assert_relative_eq!(clock.delta_time_raw(), 1.0 / 60.0);
        assert_relative_eq!(clock.delta_time(), 1.0);
    }

    #[test]
    fn regular_ticks_give_unit_delta_time() {
        let (mut clock, time) = manual_clock(60, DEFAULT_HISTORY_LEN);

        for _ in 0..200 {
            clock.tick(None);
            assert_relative_eq!(clock.delta_time(), 1.0, epsilon = 1e-6);
            time.advance_secs(1.0 / 60.0);
        }
    }

    #[test]
    fn speed_factor_scales_delta_time() {
        let (mut clock, _time) = manual_clock(30, DEFAULT_HISTORY_LEN);
        clock.set_speed_factor(2.5);

        clock.tick(None);
        clock.tick(None);

        assert_relative_eq!(clock.delta_time(), 2.5, epsilon = 1e-6);
    }

    #[test]
    fn slow_frames_raise_delta_time() {
        let (mut clock, time) = manual_clock(50, DEFAULT_HISTORY_LEN);

        clock.tick(None);
        time.advance(Duration::from_millis(60));
        clock.tick(None);

        assert_relative_eq!(clock.delta_time_raw(), 0.06, epsilon = 1e-9);
        assert_relative_eq!(clock.delta_time(), 3.0, epsilon = 1e-6);
    }

    #[test]
    fn reset_ignores_idle_gap() {
        let (mut clock, time) = manual_clock(10, DEFAULT_HISTORY_LEN);

        clock.tick(None);
        clock.tick(None);
        time.advance_secs(5.0);
        clock.reset();
        clock.tick(None);

        assert_relative_eq!(clock.delta_time(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(clock.last_frame_duration(), 0.0);
        assert_eq!(clock.frame_count(), 3);
    }

    //--- Target Rate ------------------------------------------------------

    #[test]
    fn max_fps_change_applies_from_that_tick() {
        let (mut clock, time) = manual_clock(30, DEFAULT_HISTORY_LEN);

        clock.tick(None);
        let before = time.now();
        clock.tick(Some(10));

        assert_eq!(clock.max_fps(), 10);
        assert_eq!(time.now() - before, Duration::from_millis(100));
        assert_relative_eq!(clock.delta_time(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_max_fps_is_ignored() {
        let (mut clock, _time) = manual_clock(30, DEFAULT_HISTORY_LEN);

        clock.tick(Some(0));

        assert_eq!(clock.max_fps(), 30);
    }

    #[test]
    #[should_panic(expected = "max fps must be positive")]
    fn zero_max_fps_at_construction_panics() {
        manual_clock(0, DEFAULT_HISTORY_LEN);
    }

    #[test]
    #[should_panic(expected = "frame history must hold at least")]
    fn tiny_history_panics() {
        manual_clock(30, 3);
    }

    //--- History ----------------------------------------------------------

    #[test]
    fn history_keeps_fixed_length() {
        let (mut clock, time) = manual_clock(120, 16);

        for n in 0..100 {
            clock.tick(None);
            time.advance(Duration::from_millis(n % 7));
            assert_eq!(clock.frame_durations().len(), 16);
        }
    }

    #[test]
    fn history_drops_oldest_entry() {
        let (mut clock, time) = manual_clock(1000, 5);

        for ms in 1..=7u64 {
            time.advance(Duration::from_millis(ms));
            clock.tick(None);
        }

        let durations: Vec<f64> = clock.frame_durations().collect();
        assert_eq!(durations.len(), 5);
        assert_relative_eq!(durations[4], 0.007, epsilon = 1e-9);
        assert_relative_eq!(durations[0], 0.003, epsilon = 1e-9);
        assert_relative_eq!(clock.last_frame_duration(), 0.007, epsilon = 1e-9);
    }

    #[test]
    fn frame_count_increments_per_tick() {
        let (mut clock, _time) = manual_clock(30, DEFAULT_HISTORY_LEN);
        for _ in 0..12 {
            clock.tick(None);
        }
        assert_eq!(clock.frame_count(), 12);
    }

    //--- Smoothed Readouts -----------------------------------------------

    #[test]
    fn readouts_default_to_one_when_idle() {
        let (mut clock, _time) = manual_clock(30, DEFAULT_HISTORY_LEN);

        clock.tick(None);

        assert_eq!(clock.available_fps(), 1.0);
        assert_eq!(clock.available_fps_low(), 1.0);
        assert_eq!(clock.available_fps_lazy(), 1.0);
    }

    #[test]
    fn readouts_follow_frame_work() {
        let (mut clock, time) = manual_clock(10, 10);

        // 10 ms of work per frame, 100 ms per frame in total
        for _ in 0..30 {
            time.advance(Duration::from_millis(10));
            clock.tick(None);
        }

        assert_relative_eq!(clock.available_fps(), 100.0, epsilon = 1e-3);
        assert_relative_eq!(clock.available_fps_low(), 100.0, epsilon = 1e-3);
        assert_relative_eq!(clock.available_fps_lazy(), 100.0, epsilon = 1e-3);
        assert_relative_eq!(clock.real_fps(), 10.0, epsilon = 1e-3);
    }

    #[test]
    fn low_readout_tracks_slowest_frames() {
        let (mut clock, time) = manual_clock(1, 10);

        for n in 0..10 {
            let work = if n % 3 == 0 { 50 } else { 10 };
            time.advance(Duration::from_millis(work));
            clock.tick(None);
        }

        assert_relative_eq!(clock.available_fps_low(), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn readouts_refresh_is_throttled() {
        let (mut clock, time) = manual_clock(1000, 5);

        time.advance(Duration::from_millis(10));
        clock.tick(None);
        let first = clock.available_fps_lazy();

        // Well within the refresh interval: statistics stay frozen
        time.advance(Duration::from_millis(1));
        clock.tick(None);

        assert_eq!(clock.available_fps_lazy(), first);
    }

    //--- Real Time --------------------------------------------------------

    #[test]
    fn real_time_limiting_holds_target_rate() {
        let mut clock = Clock::new(30);
        let start = std::time::Instant::now();

        while start.elapsed() < Duration::from_secs(1) {
            clock.tick(None);
        }

        let fps = clock.real_fps();
        assert!(fps <= 30.0 + 1e-3, "measured {} fps above the cap", fps);
        assert!(fps >= 28.0, "measured {} fps, expected close to 30", fps);
    }

    #[test]
    fn display_summarises_state() {
        let (mut clock, _time) = manual_clock(30, DEFAULT_HISTORY_LEN);
        clock.tick(None);
        let text = clock.to_string();
        assert!(text.starts_with("Clock["));
        assert!(text.contains("max_fps=30"));
        assert!(text.contains("frame_count=1"));
    }
}
