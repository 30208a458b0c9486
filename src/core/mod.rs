//=========================================================================
// Core Systems
//=========================================================================
//
// Everything the window loop is built from. The platform implementations
// live outside `core` and are reached only through `platform_bridge`.
//
// Layout:
//   window           frame loop, builder, lifecycle, statistics
//   scene            scenes, registry, local hooks, transitions
//   event            events, hooks and their registry
//   time             clock, frame limiter, benchmark, time sources
//   graphics         CPU surface and colours
//   math             2D vectors
//   platform_bridge  backend contract and event queue
//   config           JSON settings persistence
//   utils            named enums
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod event;
pub mod graphics;
pub mod math;
pub mod platform_bridge;
pub mod scene;
pub mod time;
pub mod utils;
pub mod window;
