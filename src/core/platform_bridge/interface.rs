//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// The contract every display backend fulfils.
//
//   open()        → create the window/surface, report its pixel size
//   pump_events() → move pending OS events into the window's queue
//   present()     → show a finished frame
//   close()       → release display resources
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::event::Event;
use crate::core::graphics::Surface;
use crate::core::math::Dimension;

//=== DisplayConfig =======================================================

/// Display settings handed to [`Backend::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub title: String,

    /// Requested inner size in physical pixels.
    pub dimension: Dimension,

    pub resizable: bool,
}

//=== PlatformError =======================================================

/// Display library failures. All are fatal to the window.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue or second loop).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// The OS window could not be created.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// The drawing surface could not be created or resized.
    #[error("Surface error: {0}")]
    Surface(String),

    /// A frame could not be presented.
    #[error("Present failed: {0}")]
    Present(String),
}

//=== Backend =============================================================

/// Display, event source and presenter behind a [`Window`](crate::core::window::Window).
pub trait Backend {
    /// Creates the display surface and returns its size in pixels.
    fn open(&mut self, config: &DisplayConfig) -> Result<Dimension, PlatformError>;

    /// Forwards every pending platform event to `sink` without blocking.
    fn pump_events(&mut self, sink: &Sender<Event>);

    /// Shows the finished frame.
    fn present(&mut self, surface: &Surface) -> Result<(), PlatformError>;

    /// Releases display resources. Called once after the loop ends.
    fn close(&mut self);
}
