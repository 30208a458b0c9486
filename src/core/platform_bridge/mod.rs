//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit, headless) with the window loop.
//
// This module defines the contract between display backends and the core
// so a backend can be swapped without touching the loop.
//
// Components:
// - `interface`: Backend trait, display configuration, platform errors
// - `event_collector`: Core-side event queue drained once per frame
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use event_collector::EventQueue;
pub use interface::{Backend, DisplayConfig, PlatformError};
