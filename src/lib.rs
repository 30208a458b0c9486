//=========================================================================
// Stagehand Library Root
//
// A single-threaded window and scene framework: a frame loop with fixed
// phase order, named scenes with crossfade transitions, event hooks and
// frame timing.
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
//
// struct Title;
// impl Scene for Title {}
//
// fn main() -> Result<(), FrameError> {
//     let mut window = Window::builder().title("Demo").start_scene("title").build();
//     window.register_scene("title", |_, _| Box::new(Title));
//     window.open(&mut ())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the window loop and everything it is built from.
// `app` is optional entry-point scaffolding (logging, exit codes).
//
pub mod app;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the winit and headless backends. Only the backend
// types are exported; their internals stay private.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::window::{FrameError, Window, WindowBuilder, WindowHandler};
pub use platform::{HeadlessBackend, HeadlessProbe};

#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use platform::WinitBackend;
