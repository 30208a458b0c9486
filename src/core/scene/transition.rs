//=========================================================================
// Scene Transition
//=========================================================================
//
// Timed crossfade between two scenes.
//
// States:
//   Disarmed ──arm()──► Armed(elapsed = 0)
//   Armed: elapsed += dt every frame
//     elapsed ≥ D  → Swap(target)  (once per arm)
//     elapsed ≥ 2D → Disarmed
//
// The overlay opacity ramps 0 → max over [0, D] and max → 0 over [D, 2D],
// so the swap happens while the screen is fully covered.
//
// Durations and elapsed time are in delta-time units (≈ frames at the
// target rate).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::SceneArgs;

//=== TransitionStep ======================================================

/// What the window has to do after advancing the transition.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionStep {
    /// Nothing to do this frame.
    Idle,

    /// Replace the active scene with the pending target.
    Swap { name: String, args: SceneArgs },
}

//=== Transition ==========================================================

#[derive(Debug, Clone, Default)]
pub struct Transition {
    target: Option<(String, SceneArgs)>,
    duration: f64,
    elapsed: Option<f64>,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Control ----------------------------------------------------------

    /// Starts a transition towards `name`.
    ///
    /// Re-arming while a transition runs replaces the pending target and
    /// restarts the timer.
    pub fn arm(&mut self, name: impl Into<String>, args: SceneArgs, duration: f64) {
        let name = name.into();
        let duration = duration.max(0.0);
        debug!(target: "scene", "Transition to '{}' armed (duration {})", name, duration);

        self.target = Some((name, args));
        self.duration = duration;
        self.elapsed = Some(0.0);
    }

    /// Advances the timer by `delta_time` and reports due work.
    pub fn advance(&mut self, delta_time: f64) -> TransitionStep {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return TransitionStep::Idle;
        };
        *elapsed += delta_time;
        let elapsed = *elapsed;

        let step = if elapsed >= self.duration {
            match self.target.take() {
                Some((name, args)) => TransitionStep::Swap { name, args },
                None => TransitionStep::Idle,
            }
        } else {
            TransitionStep::Idle
        };

        if elapsed >= 2.0 * self.duration {
            self.disarm();
        }

        step
    }

    /// Drops any pending transition.
    pub fn disarm(&mut self) {
        self.target = None;
        self.duration = 0.0;
        self.elapsed = None;
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_armed(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Name of the scene that will be swapped in.
    pub fn pending(&self) -> Option<&str> {
        self.target.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> Option<f64> {
        self.elapsed
    }

    /// Opacity of the crossfade overlay, or `None` when no overlay is due.
    pub fn overlay_alpha(&self, max_alpha: u8) -> Option<u8> {
        let elapsed = self.elapsed?;
        if self.duration <= 0.0 {
            return None;
        }

        let progress = elapsed / self.duration;
        let ramp = if progress <= 1.0 { progress } else { 2.0 - progress };
        Some((f64::from(max_alpha) * ramp.clamp(0.0, 1.0)).round() as u8)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_name(step: TransitionStep) -> Option<String> {
        match step {
            TransitionStep::Swap { name, .. } => Some(name),
            TransitionStep::Idle => None,
        }
    }

    //--- State Machine ----------------------------------------------------

    #[test]
    fn disarmed_by_default() {
        let mut transition = Transition::new();
        assert!(!transition.is_armed());
        assert_eq!(transition.advance(5.0), TransitionStep::Idle);
    }

    #[test]
    fn swaps_once_after_duration() {
        let mut transition = Transition::new();
        transition.arm("game", SceneArgs::new(), 3.0);

        assert_eq!(transition.advance(1.0), TransitionStep::Idle);
        assert_eq!(transition.advance(1.0), TransitionStep::Idle);
        assert_eq!(swap_name(transition.advance(1.0)), Some("game".to_string()));
        assert_eq!(transition.advance(1.0), TransitionStep::Idle);
        assert!(transition.is_armed());
        assert_eq!(transition.pending(), None);
    }

    #[test]
    fn disarms_after_twice_the_duration() {
        let mut transition = Transition::new();
        transition.arm("game", SceneArgs::new(), 2.0);

        for _ in 0..3 {
            transition.advance(1.0);
        }
        assert!(transition.is_armed());

        transition.advance(1.0);
        assert!(!transition.is_armed());
        assert_eq!(transition.duration(), 0.0);
        assert_eq!(transition.elapsed(), None);
    }

    #[test]
    fn zero_duration_swaps_and_disarms_in_one_step() {
        let mut transition = Transition::new();
        transition.arm("game", SceneArgs::new(), 0.0);

        assert_eq!(swap_name(transition.advance(1.0)), Some("game".to_string()));
        assert!(!transition.is_armed());
    }

    #[test]
    fn large_step_swaps_and_disarms_together() {
        let mut transition = Transition::new();
        transition.arm("game", SceneArgs::new(), 1.0);

        assert_eq!(swap_name(transition.advance(10.0)), Some("game".to_string()));
        assert!(!transition.is_armed());
    }

    #[test]
    fn rearming_overwrites_target_and_restarts() {
        let mut transition = Transition::new();
        transition.arm("a", SceneArgs::new(), 4.0);
        transition.advance(3.0);

        transition.arm("b", SceneArgs::new(), 4.0);

        assert_eq!(transition.pending(), Some("b"));
        assert_eq!(transition.elapsed(), Some(0.0));
        assert_eq!(transition.advance(3.0), TransitionStep::Idle);
        assert_eq!(swap_name(transition.advance(1.0)), Some("b".to_string()));
    }

    #[test]
    fn negative_duration_is_clamped() {
        let mut transition = Transition::new();
        transition.arm("a", SceneArgs::new(), -5.0);
        assert_eq!(transition.duration(), 0.0);
    }

    //--- Overlay ----------------------------------------------------------

    #[test]
    fn overlay_ramps_up_then_down() {
        let mut transition = Transition::new();
        transition.arm("a", SceneArgs::new(), 10.0);

        assert_eq!(transition.overlay_alpha(200), Some(0));
        transition.advance(5.0);
        assert_eq!(transition.overlay_alpha(200), Some(100));
        transition.advance(5.0);
        assert_eq!(transition.overlay_alpha(200), Some(200));
        transition.advance(5.0);
        assert_eq!(transition.overlay_alpha(200), Some(100));
    }

    #[test]
    fn no_overlay_without_duration() {
        let mut transition = Transition::new();
        assert_eq!(transition.overlay_alpha(255), None);

        transition.arm("a", SceneArgs::new(), 0.0);
        assert_eq!(transition.overlay_alpha(255), None);
    }
}
