//=========================================================================
// Window Errors
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;

//=== FrameError ==========================================================

/// Failures of [`Window::open`](super::Window::open).
///
/// None of them is retried: configuration errors abort startup before the
/// loop begins, and an error inside the loop ends it after the regular
/// shutdown sequence.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Scene mode is enabled but no scene was registered.
    #[error("scene mode is enabled but no scene is registered")]
    EmptySceneRegistry,

    /// A start scene or transition target is not registered.
    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    /// `open()` was called while the window was not closed.
    #[error("window is already open")]
    AlreadyOpen,

    /// The display library failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl FrameError {
    /// True for errors caused by the scene setup rather than the platform.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::EmptySceneRegistry | Self::UnknownScene(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
