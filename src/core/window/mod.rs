//=========================================================================
// Window
//=========================================================================
//
// Owns the display, the frame loop and the active scene.
//
// Architecture:
// ```text
//   WindowBuilder ──build()──► Window ──open(handler)──► [frame loop]
//                                │
//                                ├─ Backend       display, OS events, present
//                                ├─ Surface       CPU frame being drawn
//                                ├─ Clock         frame cap, delta time, fps
//                                ├─ EventQueue    platform + posted events
//                                ├─ HookRegistry  global event hooks
//                                ├─ SceneRegistry name → factory
//                                ├─ SceneSlot     active scene + local hooks
//                                └─ Transition    pending crossfade swap
// ```
//
// Frame:
//   1. clock tick (blocks to cap the frame rate)
//   2. early update   handler, then scene
//   3. events         per event: handler, scene, matching hooks
//   4. update         handler, then scene
//   5. render         handler (default renders the scene), then present
//   6. late update    handler, then scene
//   7. transition     advance, swap scenes when due
//
// The loop is single-threaded. Stopping is cooperative: close() or a
// Quit event (with auto_quit) clears the running flag and the current
// frame still runs to its end.
//
//=========================================================================

//=== Module Declarations =================================================

mod builder;
mod error;
mod handler;
mod stats;


//=== Public API ==========================================================

pub use builder::{
    WindowBuilder, DEFAULT_HEIGHT, DEFAULT_MAX_FPS, DEFAULT_OVERLAY_ALPHA, DEFAULT_TITLE, DEFAULT_WIDTH,
};
pub use error::FrameError;
pub use handler::WindowHandler;
pub use stats::{Phase, PhaseStats, WindowState};

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

use crossbeam_channel::Sender;
use log::*;
use serde_json::Map;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, EventHook, Handler, HookData, HookId, HookRegistry, IntoEventTypes};
use crate::core::graphics::Surface;
use crate::core::math::{Dimension, Vec2};
use crate::core::platform_bridge::{Backend, DisplayConfig, EventQueue};
use crate::core::scene::{Scene, SceneArgs, SceneHooks, SceneRegistry, SceneSlot, Transition, TransitionStep};
use crate::core::time::{Benchmark, Clock, MonotonicTime, TimeSource};
use builder::WindowOptions;

//=== Window ==============================================================

pub struct Window {
    display: DisplayConfig,
    options: WindowOptions,
    backend: Box<dyn Backend>,
    surface: Surface,

    state: WindowState,
    running: bool,

    clock: Clock,
    stats: PhaseStats,

    events: EventQueue,
    hooks: HookRegistry,
    hook_failures: u64,

    scenes: SceneRegistry,
    scene: Option<SceneSlot>,
    transition: Transition,
}

impl Window {
    //--- Construction -----------------------------------------------------

    /// A window with default settings on the desktop backend.
    pub fn new() -> Self {
        WindowBuilder::new().build()
    }

    pub fn builder() -> WindowBuilder {
        WindowBuilder::new()
    }

    pub(crate) fn from_parts(
        display: DisplayConfig,
        options: WindowOptions,
        backend: Box<dyn Backend>,
        max_fps: u32,
        history_len: usize,
        time: Option<Box<dyn TimeSource>>,
    ) -> Self {
        let time = time.unwrap_or_else(|| Box::new(MonotonicTime::new()));

        Self {
            surface: Surface::new(display.dimension),
            display,
            options,
            backend,
            state: WindowState::Closed,
            running: false,
            clock: Clock::with_time_source(max_fps, history_len, time),
            stats: PhaseStats::default(),
            events: EventQueue::new(),
            hooks: HookRegistry::new(),
            hook_failures: 0,
            scenes: SceneRegistry::new(),
            scene: None,
            transition: Transition::new(),
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Opens the display and runs the frame loop until it stops.
    ///
    /// In scene mode the start scene (or the first registered one) is
    /// resolved before the display opens, so scenes must be registered
    /// beforehand.
    ///
    /// # Errors
    ///
    /// - [`FrameError::AlreadyOpen`] when called while not closed.
    /// - [`FrameError::EmptySceneRegistry`] / [`FrameError::UnknownScene`]
    ///   when the start scene cannot be resolved; the display is not opened.
    /// - [`FrameError::UnknownScene`] when a transition targets an
    ///   unregistered scene.
    /// - [`FrameError::Platform`] when the display fails.
    ///
    /// Errors raised inside the loop are returned after the regular
    /// shutdown ran.
    pub fn open<H: WindowHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), FrameError> {
        if self.state != WindowState::Closed {
            return Err(FrameError::AlreadyOpen);
        }
        self.state = WindowState::Opening;
        info!(target: "window", "Opening '{}' at {}", self.display.title, self.display.dimension);

        let start = match self.resolve_start_scene() {
            Ok(start) => start,
            Err(err) => {
                self.state = WindowState::Closed;
                error!(target: "window", "Startup aborted: {}", err);
                return Err(err);
            }
        };

        let dimension = match self.backend.open(&self.display) {
            Ok(dimension) => dimension,
            Err(err) => {
                self.state = WindowState::Closed;
                error!(target: "window", "Display failed to open: {}", err);
                return Err(err.into());
            }
        };
        self.surface.resize(dimension);
        self.clock.reset();
        self.running = true;

        handler.init(self);
        let result = self.run_loop(handler, start);
        self.shutdown(handler);

        if let Err(err) = &result {
            error!(target: "window", "Frame loop failed: {}", err);
        }
        result
    }

    /// Stops the loop once the current frame has finished.
    pub fn close(&mut self) {
        if self.running {
            info!(target: "window", "Close requested");
        }
        self.running = false;
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn resolve_start_scene(&self) -> Result<Option<(String, SceneArgs)>, FrameError> {
        if !self.options.scene_mode {
            return Ok(None);
        }
        if self.scenes.is_empty() {
            return Err(FrameError::EmptySceneRegistry);
        }

        match &self.options.start_scene {
            Some((name, _)) if !self.scenes.contains(name) => Err(FrameError::UnknownScene(name.clone())),
            Some((name, args)) => Ok(Some((name.clone(), args.clone()))),
            None => Ok(self.scenes.first().map(|name| (name.to_string(), Map::new()))),
        }
    }

    fn run_loop<H: WindowHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        start: Option<(String, SceneArgs)>,
    ) -> Result<(), FrameError> {
        if let Some((name, args)) = start {
            self.enter_scene(name, args)?;
        }
        self.state = WindowState::Running;

        while self.running {
            self.run_frame(handler)?;
        }
        Ok(())
    }

    fn shutdown<H: WindowHandler + ?Sized>(&mut self, handler: &mut H) {
        self.state = WindowState::Closing;
        self.running = false;

        self.leave_scene();
        handler.quit(self);

        self.transition.disarm();
        self.backend.close();
        self.state = WindowState::Closed;
        info!(target: "window", "Closed after {} frames", self.clock.frame_count());
    }

    //--- Frame ------------------------------------------------------------

    fn run_frame<H: WindowHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), FrameError> {
        self.clock.tick(None);

        self.timed(Phase::EarlyUpdate, |window| {
            handler.early_update(window);
            window.with_scene(|scene, window| scene.early_update(window));
        });

        self.timed(Phase::Event, |window| {
            window.backend.pump_events(window.events.sink());
            for event in window.events.collect_frame() {
                window.dispatch_event(handler, &event);
            }
        });

        self.timed(Phase::Update, |window| {
            handler.update(window);
            window.with_scene(|scene, window| scene.update(window));
        });

        self.timed(Phase::Render, |window| {
            handler.render(window);
            if window.options.auto_update_screen {
                window.backend.present(&window.surface)?;
            }
            Ok::<(), FrameError>(())
        })?;

        self.timed(Phase::LateUpdate, |window| {
            handler.late_update(window);
            window.with_scene(|scene, window| scene.late_update(window));
        });

        self.advance_transition()
    }

    fn timed<R>(&mut self, phase: Phase, f: impl FnOnce(&mut Self) -> R) -> R {
        let bench = Benchmark::start();
        let result = f(self);
        self.stats.record(phase, bench.stop());
        result
    }

    //--- Events -----------------------------------------------------------

    fn dispatch_event<H: WindowHandler + ?Sized>(&mut self, handler: &mut H, event: &Event) {
        if let Event::Resized { width, height } = *event {
            self.surface.resize(Vec2::new(width, height));
            self.events.post(Event::ScreenUpdate);
        }

        handler.event(self, event);
        self.with_scene(|scene, window| scene.event(window, event));
        self.run_hooks(event);

        if matches!(event, Event::Quit) && self.options.auto_quit {
            info!(target: "window", "Quit event received");
            self.running = false;
        }
    }

    /// Runs every handler of every hook matching `event`.
    ///
    /// Hooks are snapshotted first: hooks added by a handler see the next
    /// event, hooks removed by a handler still see this one.
    fn run_hooks(&mut self, event: &Event) {
        for hook in self.hooks.matching(event.event_type()) {
            for (index, handler) in hook.handlers().iter().enumerate() {
                if let Err(err) = handler(event, self, hook.data()) {
                    self.hook_failures += 1;
                    error!(
                        target: "hooks",
                        "Handler {} of hook '{}' {} failed on {:?}: {:#}",
                        index,
                        hook.name(),
                        hook.id(),
                        event.event_type(),
                        err
                    );
                }
            }
        }
    }

    /// Queues an event for the next event phase.
    pub fn post_event(&self, event: Event) {
        self.events.post(event);
    }

    /// A `Send` handle for posting events from other threads.
    pub fn event_sender(&self) -> Sender<Event> {
        self.events.sender()
    }

    //--- Event Hooks ------------------------------------------------------

    /// Registers a global hook running `handlers` for each of `events`.
    pub fn add_event_hook(
        &mut self,
        name: impl Into<String>,
        events: impl IntoEventTypes,
        handlers: Vec<Handler>,
        data: HookData,
    ) -> Rc<EventHook> {
        self.hooks.add(name, events, handlers, data)
    }

    pub fn remove_event_hook(&mut self, id: HookId) -> bool {
        self.hooks.remove(id)
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Number of hook handlers that returned an error so far.
    pub fn hook_failures(&self) -> u64 {
        self.hook_failures
    }

    //--- Scene Hooks ------------------------------------------------------

    /// Adds a hook owned by the active scene.
    ///
    /// The hook is global while the scene's hooks are active and is
    /// removed when the scene is replaced. Returns `None` without a scene,
    /// which includes the time a scene factory runs; register from
    /// [`Scene::init`] instead.
    pub fn add_scene_event_hook(
        &mut self,
        name: impl Into<String>,
        events: impl IntoEventTypes,
        handlers: Vec<Handler>,
        data: HookData,
    ) -> Option<Rc<EventHook>> {
        let slot = self.scene.as_mut()?;
        let hook = self.hooks.create(name, events, handlers, data);
        slot.hooks.add(Rc::clone(&hook), &mut self.hooks);
        Some(hook)
    }

    pub fn remove_scene_event_hook(&mut self, id: HookId) -> bool {
        match self.scene.as_mut() {
            Some(slot) => slot.hooks.remove(id, &mut self.hooks),
            None => false,
        }
    }

    /// Mirrors the active scene's hooks into the global list. Idempotent.
    pub fn activate_scene_hooks(&mut self) {
        if let Some(slot) = self.scene.as_mut() {
            slot.hooks.activate(&mut self.hooks);
        }
    }

    /// Removes the active scene's hooks from the global list.
    pub fn deactivate_scene_hooks(&mut self) {
        if let Some(slot) = self.scene.as_mut() {
            slot.hooks.deactivate(&mut self.hooks);
        }
    }

    pub fn scene_hooks(&self) -> Option<&SceneHooks> {
        self.scene.as_ref().map(|slot| &slot.hooks)
    }

    //--- Scenes -----------------------------------------------------------

    /// Registers a scene factory under `name`.
    pub fn register_scene<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&mut Window, &SceneArgs) -> Box<dyn Scene> + 'static,
    {
        self.scenes.register(name, factory);
    }

    pub fn scenes(&self) -> &SceneRegistry {
        &self.scenes
    }

    /// Starts a crossfade to `name`.
    ///
    /// The swap happens once `duration` (in delta-time units) has elapsed
    /// and the overlay fades out over the same duration again. The target
    /// is looked up at swap time; a later call replaces a pending target.
    pub fn change_scene(&mut self, name: impl Into<String>, args: SceneArgs, duration: f64) {
        self.transition.arm(name, args, duration);
    }

    pub fn scene_name(&self) -> Option<&str> {
        self.scene.as_ref().map(|slot| slot.name.as_str())
    }

    pub fn scene_args(&self) -> Option<&SceneArgs> {
        self.scene.as_ref().map(|slot| &slot.args)
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Renders the active scene, then the transition overlay if one is due.
    pub fn render_scene(&mut self) {
        self.with_scene(|scene, window| scene.render(window));

        if let Some(alpha) = self.transition.overlay_alpha(self.options.overlay_max_alpha) {
            self.surface.blend_fill(self.options.overlay_color, alpha);
        }
    }

    /// Runs `f` on the active scene, lending it the window.
    fn with_scene(&mut self, f: impl FnOnce(&mut dyn Scene, &mut Window)) {
        let Some(mut scene) = self.scene.as_mut().and_then(|slot| slot.scene.take()) else {
            return;
        };

        f(&mut *scene, self);

        if let Some(slot) = self.scene.as_mut() {
            if slot.scene.is_none() {
                slot.scene = Some(scene);
            }
        }
    }

    fn enter_scene(&mut self, name: String, args: SceneArgs) -> Result<(), FrameError> {
        let factory = self
            .scenes
            .get(&name)
            .ok_or_else(|| FrameError::UnknownScene(name.clone()))?;

        let scene = factory(self, &args);
        let mut slot = SceneSlot::new(name, args, scene);
        slot.hooks.activate(&mut self.hooks);
        info!(target: "scene", "Entered scene '{}'", slot.name);

        self.scene = Some(slot);
        self.with_scene(|scene, window| scene.init(window));
        Ok(())
    }

    fn leave_scene(&mut self) {
        self.with_scene(|scene, window| scene.quit(window));

        if let Some(mut slot) = self.scene.take() {
            slot.hooks.deactivate(&mut self.hooks);
            info!(target: "scene", "Left scene '{}'", slot.name);
        }
    }

    fn advance_transition(&mut self) -> Result<(), FrameError> {
        match self.transition.advance(self.clock.delta_time()) {
            TransitionStep::Idle => Ok(()),
            TransitionStep::Swap { name, args } => {
                if !self.scenes.contains(&name) {
                    self.transition.disarm();
                    return Err(FrameError::UnknownScene(name));
                }
                self.leave_scene();
                self.enter_scene(name, args)
            }
        }
    }

    //--- Display ----------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.display.title
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn dimension(&self) -> Dimension {
        self.surface.dimension()
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Presents the surface now, for windows without `auto_update_screen`.
    pub fn update_screen(&mut self) -> Result<(), FrameError> {
        self.backend.present(&self.surface)?;
        Ok(())
    }

    //--- Options ----------------------------------------------------------

    pub fn auto_quit(&self) -> bool {
        self.options.auto_quit
    }

    pub fn set_auto_quit(&mut self, enabled: bool) {
        self.options.auto_quit = enabled;
    }

    pub fn auto_update_screen(&self) -> bool {
        self.options.auto_update_screen
    }

    pub fn set_auto_update_screen(&mut self, enabled: bool) {
        self.options.auto_update_screen = enabled;
    }

    pub fn scene_mode(&self) -> bool {
        self.options.scene_mode
    }

    //--- Timing -----------------------------------------------------------

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Frame-rate independent step of the current frame (≈1 at target fps).
    pub fn delta_time(&self) -> f64 {
        self.clock.delta_time()
    }

    /// Phase durations of the most recent frame.
    pub fn stats(&self) -> &PhaseStats {
        &self.stats
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.display.title)
            .field("dimension", &self.surface.dimension())
            .field("state", &self.state)
            .field("running", &self.running)
            .field("scene", &self.scene_name())
            .field("hooks", &self.hooks.len())
            .field("transition", &self.transition)
            .finish()
    }
}
