//=========================================================================
// Headless Backend
//=========================================================================
//
// A backend without a display. Events come from a script of frames, and
// presented frames are counted instead of shown. Used for tests and for
// running scenes on machines without a window system.
//
// Script:
//   frame 1 events → frame 2 events → ... → Quit (once, when exhausted)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crossbeam_channel::Sender;
use log::*;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::graphics::Surface;
use crate::core::math::Dimension;
use crate::core::platform_bridge::{Backend, DisplayConfig, PlatformError};

//=== HeadlessProbe =======================================================

/// Shared view of what a [`HeadlessBackend`] was asked to do.
///
/// Clones observe the same counters, so a probe kept outside the window
/// stays readable after the backend moved into it.
#[derive(Debug, Clone, Default)]
pub struct HeadlessProbe {
    inner: Rc<ProbeState>,
}

#[derive(Debug, Default)]
struct ProbeState {
    opened: Cell<u32>,
    closed: Cell<u32>,
    pumps: Cell<u64>,
    presents: Cell<u64>,
    config: RefCell<Option<DisplayConfig>>,
    last_frame: RefCell<Option<Surface>>,
}

impl HeadlessProbe {
    pub fn opened(&self) -> u32 {
        self.inner.opened.get()
    }

    pub fn closed(&self) -> u32 {
        self.inner.closed.get()
    }

    pub fn pumps(&self) -> u64 {
        self.inner.pumps.get()
    }

    pub fn presents(&self) -> u64 {
        self.inner.presents.get()
    }

    /// Settings of the most recent open().
    pub fn config(&self) -> Option<DisplayConfig> {
        self.inner.config.borrow().clone()
    }

    /// Copy of the most recently presented frame.
    pub fn last_frame(&self) -> Option<Surface> {
        self.inner.last_frame.borrow().clone()
    }
}

//=== HeadlessBackend =====================================================

#[derive(Debug)]
pub struct HeadlessBackend {
    script: VecDeque<Vec<Event>>,
    quit_when_exhausted: bool,
    quit_sent: bool,
    fail_open: Option<String>,
    probe: HeadlessProbe,
}

impl HeadlessBackend {
    /// A backend whose script is empty: the first frame receives `Quit`.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            quit_when_exhausted: true,
            quit_sent: false,
            fail_open: None,
            probe: HeadlessProbe::default(),
        }
    }

    //--- Script -----------------------------------------------------------

    /// Appends a frame delivering `events` in order.
    pub fn frame(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.script.push_back(events.into_iter().collect());
        self
    }

    /// Appends `count` frames without events.
    pub fn idle_frames(mut self, count: usize) -> Self {
        self.script.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    /// Never sends `Quit` on its own; the window must be closed explicitly.
    pub fn run_forever(mut self) -> Self {
        self.quit_when_exhausted = false;
        self
    }

    /// Makes open() fail with a window creation error.
    pub fn fail_open(mut self, reason: impl Into<String>) -> Self {
        self.fail_open = Some(reason.into());
        self
    }

    pub fn probe(&self) -> HeadlessProbe {
        self.probe.clone()
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeadlessBackend {
    fn open(&mut self, config: &DisplayConfig) -> Result<Dimension, PlatformError> {
        if let Some(reason) = &self.fail_open {
            return Err(PlatformError::WindowCreation(reason.clone()));
        }

        let state = &self.probe.inner;
        state.opened.set(state.opened.get() + 1);
        *state.config.borrow_mut() = Some(config.clone());
        self.quit_sent = false;

        debug!(target: "platform", "Headless display opened at {}", config.dimension);
        Ok(config.dimension)
    }

    fn pump_events(&mut self, sink: &Sender<Event>) {
        let state = &self.probe.inner;
        state.pumps.set(state.pumps.get() + 1);

        let events = match self.script.pop_front() {
            Some(events) => events,
            None if self.quit_when_exhausted && !self.quit_sent => {
                self.quit_sent = true;
                vec![Event::Quit]
            }
            None => return,
        };

        for event in events {
            if sink.send(event).is_err() {
                warn!(target: "platform", "Event queue disconnected, dropping scripted events");
                return;
            }
        }
    }

    fn present(&mut self, surface: &Surface) -> Result<(), PlatformError> {
        let state = &self.probe.inner;
        state.presents.set(state.presents.get() + 1);
        *state.last_frame.borrow_mut() = Some(surface.clone());
        Ok(())
    }

    fn close(&mut self) {
        let state = &self.probe.inner;
        state.closed.set(state.closed.get() + 1);
        debug!(target: "platform", "Headless display closed");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec2;
    use crossbeam_channel::unbounded;

    fn config() -> DisplayConfig {
        DisplayConfig {
            title: "test".to_string(),
            dimension: Vec2::new(4, 3),
            resizable: false,
        }
    }

    #[test]
    fn plays_script_then_quits_once() {
        let (tx, rx) = unbounded();
        let mut backend = HeadlessBackend::new()
            .frame([Event::Focused(true), Event::ScreenUpdate])
            .idle_frames(1);

        backend.pump_events(&tx);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Event::Focused(true), Event::ScreenUpdate]);

        backend.pump_events(&tx);
        assert!(rx.try_recv().is_err());

        backend.pump_events(&tx);
        assert_eq!(rx.try_recv(), Ok(Event::Quit));

        backend.pump_events(&tx);
        assert!(rx.try_recv().is_err());
        assert_eq!(backend.probe().pumps(), 4);
    }

    #[test]
    fn run_forever_never_quits() {
        let (tx, rx) = unbounded();
        let mut backend = HeadlessBackend::new().run_forever();
        for _ in 0..3 {
            backend.pump_events(&tx);
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn probe_survives_the_backend() {
        let mut backend = HeadlessBackend::new();
        let probe = backend.probe();

        assert_eq!(backend.open(&config()).ok(), Some(Vec2::new(4, 3)));
        backend.present(&Surface::new(Vec2::new(4, 3))).ok();
        backend.close();
        drop(backend);

        assert_eq!(probe.opened(), 1);
        assert_eq!(probe.presents(), 1);
        assert_eq!(probe.closed(), 1);
        assert_eq!(probe.config().map(|c| c.title), Some("test".to_string()));
        assert_eq!(probe.last_frame().map(|f| f.width()), Some(4));
    }

    #[test]
    fn fail_open_reports_window_creation() {
        let mut backend = HeadlessBackend::new().fail_open("no display");
        assert!(matches!(backend.open(&config()), Err(PlatformError::WindowCreation(_))));
        assert_eq!(backend.probe().opened(), 0);
    }
}
