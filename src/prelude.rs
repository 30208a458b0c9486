//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Window
pub use crate::core::window::{FrameError, Phase, Window, WindowBuilder, WindowHandler, WindowState};

// Scenes
pub use crate::core::scene::{Scene, SceneArgs};

// Events and hooks
pub use crate::core::event::{handler, Event, EventType, HookData, KeyCode, Modifiers, MouseButton};

// Drawing and math
pub use crate::core::graphics::{Rgb, Surface};
pub use crate::core::math::{Dimension, Vec2};

// Backends
pub use crate::core::platform_bridge::Backend;
pub use crate::platform::HeadlessBackend;
