//=========================================================================
// Window Handler
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Window;
use crate::core::event::Event;

//=== WindowHandler Trait =================================================

/// Application callbacks driven by [`Window::open`].
///
/// All callbacks are optional. Per frame the window calls them in this
/// order, each followed by the matching callback of the active scene:
///
/// ```text
/// early_update → event (per event) → update → render → late_update
/// ```
///
/// Unlike the other callbacks, `render` is not followed by the scene's
/// render automatically: the default implementation calls
/// [`Window::render_scene`], and an override decides itself whether and
/// when to do so.
pub trait WindowHandler {
    /// Called once after the display opened, before the start scene.
    fn init(&mut self, _window: &mut Window) {}

    /// Called for every dequeued event, before the scene and hooks.
    fn event(&mut self, _window: &mut Window, _event: &Event) {}

    fn early_update(&mut self, _window: &mut Window) {}

    fn update(&mut self, _window: &mut Window) {}

    fn render(&mut self, window: &mut Window) {
        window.render_scene();
    }

    fn late_update(&mut self, _window: &mut Window) {}

    /// Called once after the loop ended and the scene quit.
    fn quit(&mut self, _window: &mut Window) {}
}

/// Scene-only applications need no window callbacks.
impl WindowHandler for () {}
