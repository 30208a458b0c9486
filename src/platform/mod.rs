//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Implementations of the platform bridge's `Backend` trait.
//
// Architecture:
// ```text
//   Window ──Backend──┬── WinitBackend     winit window + softbuffer
//                     │      └─ InputProcessor (winit → Event)
//                     └── HeadlessBackend  scripted events, counted frames
// ```
//
// The winit backend needs a desktop event loop that can be pumped without
// handing over control, which winit does not offer on the web or iOS.
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod input_processor;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
mod winit_backend;

//=== Public API ==========================================================

pub use headless::{HeadlessBackend, HeadlessProbe};

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use winit_backend::WinitBackend;

//=== Default Backend =====================================================

use crate::core::platform_bridge::Backend;

/// The backend a window uses when none is configured.
pub(crate) fn default_backend() -> Box<dyn Backend> {
    #[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
    {
        Box::new(WinitBackend::new())
    }

    #[cfg(any(target_arch = "wasm32", target_os = "ios"))]
    {
        log::warn!(target: "platform", "No desktop event loop on this target, running headless");
        Box::new(HeadlessBackend::new())
    }
}
