//=========================================================================
// Scene System
//=========================================================================
//
// Per-screen behaviour units, the registry that constructs them by name,
// and the timed transition that swaps the active one.
//
// Architecture:
//   Window
//     ├─ SceneRegistry: name → SceneFactory (insertion order)
//     ├─ SceneSlot: the active scene + its local hooks
//     └─ Transition: pending target, duration, elapsed
//
// Flow:
//   change_scene() → Transition::arm()
//   each frame     → Transition::advance(dt) → swap at D, disarm at 2D
//
//=========================================================================

//=== Module Declarations =================================================

mod hooks;
mod registry;
mod slot;
mod transition;

//=== Public API ==========================================================

pub use hooks::SceneHooks;
pub use registry::{SceneFactory, SceneRegistry};
pub use transition::{Transition, TransitionStep};

pub(crate) use slot::SceneSlot;

//=== Internal Dependencies ===============================================

use serde_json::{Map, Value};

use crate::core::event::Event;
use crate::core::window::Window;

//=== SceneArgs ===========================================================

/// Arguments a scene is constructed with.
pub type SceneArgs = Map<String, Value>;

//=== Scene Trait =========================================================

/// Defines scene behaviour through lifecycle callbacks.
///
/// Every callback has an empty default, so a scene only overrides what it
/// needs. The window calls them at fixed points of each frame:
///
/// ```text
/// early_update → event (per event) → update → render* → late_update
/// ```
///
/// `render` runs when the window's render callback calls
/// [`Window::render_scene`] (the default does).
///
/// ```rust
/// use stagehand::prelude::*;
///
/// struct Title;
///
/// impl Scene for Title {
///     fn render(&mut self, window: &mut Window) {
///         window.surface_mut().fill(Rgb::BLUE);
///     }
/// }
/// ```
pub trait Scene {
    /// Called once after construction, before the scene's first frame.
    ///
    /// Register scene-local hooks here with
    /// [`Window::add_scene_event_hook`]. The scene is not active yet
    /// while its factory runs, so the call returns `None` there.
    fn init(&mut self, _window: &mut Window) {}

    /// Called for every dequeued event, before matching hooks run.
    fn event(&mut self, _window: &mut Window, _event: &Event) {}

    /// Called every frame before event handling.
    fn early_update(&mut self, _window: &mut Window) {}

    /// Called every frame after event handling.
    fn update(&mut self, _window: &mut Window) {}

    /// Called every frame after rendering.
    fn late_update(&mut self, _window: &mut Window) {}

    /// Draws the scene into the window surface.
    fn render(&mut self, _window: &mut Window) {}

    /// Called once when the scene is replaced or the window closes.
    fn quit(&mut self, _window: &mut Window) {}
}
