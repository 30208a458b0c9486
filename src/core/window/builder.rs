//=========================================================================
// Window Builder
//=========================================================================

//=== External Dependencies ===============================================

use serde_json::Map;

//=== Internal Dependencies ===============================================

use super::Window;
use crate::core::graphics::Rgb;
use crate::core::math::{Dimension, Vec2};
use crate::core::platform_bridge::{Backend, DisplayConfig};
use crate::core::scene::SceneArgs;
use crate::core::time::{TimeSource, DEFAULT_HISTORY_LEN};

//=== Defaults ============================================================

pub const DEFAULT_TITLE: &str = "Stagehand";
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 700;
pub const DEFAULT_MAX_FPS: u32 = 30;
pub const DEFAULT_OVERLAY_ALPHA: u8 = 255;

/// Smallest accepted frame history (the short average needs 5 entries).
const MIN_HISTORY_LEN: usize = 5;

//=== WindowOptions =======================================================

/// Loop behaviour fixed at build time.
#[derive(Debug, Clone)]
pub(crate) struct WindowOptions {
    pub(crate) auto_quit: bool,
    pub(crate) auto_update_screen: bool,
    pub(crate) scene_mode: bool,
    pub(crate) start_scene: Option<(String, SceneArgs)>,
    pub(crate) overlay_color: Rgb,
    pub(crate) overlay_max_alpha: u8,
}

//=== WindowBuilder =======================================================

/// Builder for configuring and constructing a [`Window`].
///
/// # Default Values
///
/// - **Title**: "Stagehand"
/// - **Size**: 1000×700
/// - **Max fps**: 30
/// - **Frame history**: 90 frames
/// - **auto_quit / auto_update_screen**: on
/// - **Scene mode**: off
/// - **Transition overlay**: black, fully opaque at its peak
/// - **Backend**: the desktop window; **time**: the monotonic clock
///
/// # Examples
///
/// ```no_run
/// use stagehand::prelude::*;
///
/// struct Menu;
/// impl Scene for Menu {}
///
/// let mut window = WindowBuilder::new()
///     .title("Demo")
///     .size(640, 480)
///     .max_fps(60)
///     .scene_mode(true)
///     .build();
///
/// window.register_scene("menu", |_, _| Box::new(Menu));
/// window.open(&mut ()).unwrap();
/// ```
pub struct WindowBuilder {
    title: String,
    dimension: Dimension,
    resizable: bool,
    max_fps: u32,
    history_len: usize,
    options: WindowOptions,
    backend: Option<Box<dyn Backend>>,
    time: Option<Box<dyn TimeSource>>,
}

impl WindowBuilder {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            dimension: Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            resizable: true,
            max_fps: DEFAULT_MAX_FPS,
            history_len: DEFAULT_HISTORY_LEN,
            options: WindowOptions {
                auto_quit: true,
                auto_update_screen: true,
                scene_mode: false,
                start_scene: None,
                overlay_color: Rgb::BLACK,
                overlay_max_alpha: DEFAULT_OVERLAY_ALPHA,
            },
            backend: None,
            time: None,
        }
    }

    //--- Display ----------------------------------------------------------

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the requested surface size in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either side is zero.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.dimension = Vec2::new(width, height);
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    //--- Timing -----------------------------------------------------------

    /// Sets the frame rate cap and the delta-time reference rate.
    ///
    /// # Panics
    ///
    /// Panics if `max_fps == 0`.
    pub fn max_fps(mut self, max_fps: u32) -> Self {
        assert!(max_fps > 0, "Max fps must be positive, got {}", max_fps);
        self.max_fps = max_fps;
        self
    }

    /// Sets how many frame durations the fps statistics average over.
    ///
    /// # Panics
    ///
    /// Panics if `len < 5`.
    pub fn history_len(mut self, len: usize) -> Self {
        assert!(
            len >= MIN_HISTORY_LEN,
            "Frame history must hold at least {} frames, got {}",
            MIN_HISTORY_LEN,
            len
        );
        self.history_len = len;
        self
    }

    pub fn time_source(mut self, time: impl TimeSource + 'static) -> Self {
        self.time = Some(Box::new(time));
        self
    }

    //--- Loop Behaviour ---------------------------------------------------

    /// Whether a `Quit` event stops the loop.
    pub fn auto_quit(mut self, enabled: bool) -> Self {
        self.options.auto_quit = enabled;
        self
    }

    /// Whether the surface is presented after every render phase.
    pub fn auto_update_screen(mut self, enabled: bool) -> Self {
        self.options.auto_update_screen = enabled;
        self
    }

    /// Starts the first registered scene when the window opens.
    pub fn scene_mode(mut self, enabled: bool) -> Self {
        self.options.scene_mode = enabled;
        self
    }

    /// Starts `name` when the window opens. Enables scene mode.
    pub fn start_scene(self, name: impl Into<String>) -> Self {
        self.start_scene_with(name, Map::new())
    }

    /// Like [`start_scene`](Self::start_scene) with construction arguments.
    pub fn start_scene_with(mut self, name: impl Into<String>, args: SceneArgs) -> Self {
        self.options.scene_mode = true;
        self.options.start_scene = Some((name.into(), args));
        self
    }

    /// Colour and peak opacity of the scene transition overlay.
    pub fn transition_overlay(mut self, color: Rgb, max_alpha: u8) -> Self {
        self.options.overlay_color = color;
        self.options.overlay_max_alpha = max_alpha;
        self
    }

    //--- Platform ---------------------------------------------------------

    pub fn backend(mut self, backend: impl Backend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    //--- Construction -----------------------------------------------------

    pub fn build(self) -> Window {
        let display = DisplayConfig {
            title: self.title,
            dimension: self.dimension,
            resizable: self.resizable,
        };
        let backend = self.backend.unwrap_or_else(crate::platform::default_backend);

        Window::from_parts(display, self.options, backend, self.max_fps, self.history_len, self.time)
    }
}

impl Default for WindowBuilder {
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
    use crate::platform::HeadlessBackend;

    #[test]
    fn defaults() {
        let window = WindowBuilder::new().backend(HeadlessBackend::new()).build();

        assert_eq!(window.title(), DEFAULT_TITLE);
        assert_eq!(window.dimension(), Vec2::new(1000, 700));
        assert_eq!(window.clock().max_fps(), 30);
        assert_eq!(window.clock().frame_durations().len(), DEFAULT_HISTORY_LEN);
        assert!(window.auto_quit());
        assert!(window.auto_update_screen());
        assert!(!window.scene_mode());
    }

    #[test]
    fn setters_apply() {
        let window = WindowBuilder::new()
            .title("Custom")
            .size(320, 200)
            .max_fps(60)
            .history_len(12)
            .auto_quit(false)
            .auto_update_screen(false)
            .backend(HeadlessBackend::new())
            .build();

        assert_eq!(window.title(), "Custom");
        assert_eq!(window.width(), 320);
        assert_eq!(window.height(), 200);
        assert_eq!(window.clock().max_fps(), 60);
        assert_eq!(window.clock().frame_durations().len(), 12);
        assert!(!window.auto_quit());
        assert!(!window.auto_update_screen());
    }

    #[test]
    fn start_scene_enables_scene_mode() {
        let window = WindowBuilder::new()
            .start_scene("menu")
            .backend(HeadlessBackend::new())
            .build();
        assert!(window.scene_mode());
    }

    #[test]
    #[should_panic(expected = "Max fps must be positive")]
    fn zero_fps_panics() {
        let _ = WindowBuilder::new().max_fps(0);
    }

    #[test]
    #[should_panic(expected = "Frame history must hold at least")]
    fn short_history_panics() {
        let _ = WindowBuilder::new().history_len(4);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn zero_size_panics() {
        let _ = WindowBuilder::new().size(0, 10);
    }
}
