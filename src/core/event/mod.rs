//=========================================================================
// Event System
//=========================================================================
//
// Engine-level events and the hooks that react to them.
//
// Architecture:
//   Platform ──► Event ──► Window::event / Scene::event
//                  │
//                  └──► HookRegistry::matching(event_type) ──► handlers
//
//=========================================================================

//=== Module Declarations =================================================

mod events;
mod hook;
mod input;

//=== Public API ==========================================================

pub use events::{Event, EventType, IntoEventTypes};
pub use hook::{handler, EventHook, Handler, HookData, HookId, HookRegistry};
pub use input::{KeyCode, Modifiers, MouseButton};
