//=========================================================================
// Frame Statistics
//=========================================================================
//
// Durations of the five timed phases of the most recent frame, plus the
// window's lifecycle state.
//
//=========================================================================

crate::named_enum! {
    /// A timed phase of the window loop, in execution order.
    pub enum Phase {
        EarlyUpdate,
        Event,
        Update,
        Render,
        LateUpdate,
    }
}

crate::named_enum! {
    /// Lifecycle of a [`Window`](super::Window).
    ///
    /// ```text
    /// Closed → Opening → Running → Closing → Closed
    /// ```
    pub enum WindowState {
        Closed,
        Opening,
        Running,
        Closing,
    }
}

//=== PhaseStats ==========================================================

/// Seconds spent in each phase during the most recent frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseStats {
    pub early_update: f64,
    pub event: f64,
    pub update: f64,
    pub render: f64,
    pub late_update: f64,
}

impl PhaseStats {
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::EarlyUpdate => self.early_update,
            Phase::Event => self.event,
            Phase::Update => self.update,
            Phase::Render => self.render,
            Phase::LateUpdate => self.late_update,
        }
    }

    pub(crate) fn record(&mut self, phase: Phase, seconds: f64) {
        match phase {
            Phase::EarlyUpdate => self.early_update = seconds,
            Phase::Event => self.event = seconds,
            Phase::Update => self.update = seconds,
            Phase::Render => self.render = seconds,
            Phase::LateUpdate => self.late_update = seconds,
        }
    }

    /// Sum over all phases.
    pub fn total(&self) -> f64 {
        Phase::ALL.iter().map(|&phase| self.get(phase)).sum()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_are_in_loop_order() {
        let names: Vec<&str> = Phase::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["EarlyUpdate", "Event", "Update", "Render", "LateUpdate"]);
    }

    #[test]
    fn record_and_get() {
        let mut stats = PhaseStats::default();
        for (i, &phase) in Phase::ALL.iter().enumerate() {
            stats.record(phase, i as f64);
        }

        assert_eq!(stats.get(Phase::Render), 3.0);
        assert_eq!(stats.late_update, 4.0);
        assert_eq!(stats.total(), 10.0);
    }

    #[test]
    fn window_state_parses() {
        assert_eq!("Running".parse::<WindowState>(), Ok(WindowState::Running));
        assert_eq!(WindowState::Closed.to_string(), "Closed");
    }
}
