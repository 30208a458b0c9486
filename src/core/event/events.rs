//=========================================================================
// Events
//=========================================================================
//
// Everything the window loop dispatches during the event phase.
//
// Each Event maps to an EventType tag. Hooks subscribe to tags, so two
// KeyDown events for different keys both match a KeyDown hook.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde_json::Value;

//=== Internal Dependencies ===============================================

use super::{KeyCode, Modifiers, MouseButton};

//=== Event ===============================================================

/// An event dequeued by the window during the event phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user or the OS asked the window to close.
    Quit,

    /// The drawing surface was recreated (e.g. after a resize). Anything
    /// holding surface dimensions should refresh them.
    ScreenUpdate,

    /// The window's inner size changed.
    Resized { width: u32, height: u32 },

    /// The window gained (`true`) or lost (`false`) focus.
    Focused(bool),

    /// Key pressed down.
    KeyDown { key: KeyCode, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: KeyCode, modifiers: Modifiers },

    /// Mouse button pressed.
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },

    /// Mouse button released.
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor moved, in physical pixels from the top-left corner.
    MouseMoved { x: f32, y: f32 },

    /// Wheel or touchpad scroll, in lines.
    MouseWheel { dx: f32, dy: f32 },

    /// Application-defined event posted through the window's event queue.
    User { code: u32, payload: Value },
}

impl Event {
    /// Tag used to match this event against hook subscriptions.
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Quit => EventType::Quit,
            Self::ScreenUpdate => EventType::ScreenUpdate,
            Self::Resized { .. } => EventType::Resized,
            Self::Focused(_) => EventType::Focused,
            Self::KeyDown { .. } => EventType::KeyDown,
            Self::KeyUp { .. } => EventType::KeyUp,
            Self::MouseButtonDown { .. } => EventType::MouseButtonDown,
            Self::MouseButtonUp { .. } => EventType::MouseButtonUp,
            Self::MouseMoved { .. } => EventType::MouseMoved,
            Self::MouseWheel { .. } => EventType::MouseWheel,
            Self::User { code, .. } => EventType::User(*code),
        }
    }

    /// Shorthand for a user event without payload.
    pub fn user(code: u32) -> Self {
        Self::User { code, payload: Value::Null }
    }
}

//=== EventType ===========================================================

/// Payload-free tag of an [`Event`].
///
/// User events are told apart by their code, so hooks can subscribe to
/// individual application-defined events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Quit,
    ScreenUpdate,
    Resized,
    Focused,
    KeyDown,
    KeyUp,
    MouseButtonDown,
    MouseButtonUp,
    MouseMoved,
    MouseWheel,
    User(u32),
}

//=== IntoEventTypes ======================================================

/// Accepts one event type or several where a hook subscription is made.
///
/// The result keeps first-seen order and drops duplicates.
pub trait IntoEventTypes {
    fn into_event_types(self) -> Vec<EventType>;
}

impl IntoEventTypes for EventType {
    fn into_event_types(self) -> Vec<EventType> {
        vec![self]
    }
}

impl IntoEventTypes for Vec<EventType> {
    fn into_event_types(self) -> Vec<EventType> {
        dedup_in_order(self)
    }
}

impl IntoEventTypes for &[EventType] {
    fn into_event_types(self) -> Vec<EventType> {
        dedup_in_order(self.to_vec())
    }
}

impl<const N: usize> IntoEventTypes for [EventType; N] {
    fn into_event_types(self) -> Vec<EventType> {
        dedup_in_order(self.to_vec())
    }
}

fn dedup_in_order(types: Vec<EventType>) -> Vec<EventType> {
    let mut unique = Vec::with_capacity(types.len());
    for ty in types {
        if !unique.contains(&ty) {
            unique.push(ty);
        }
    }
    unique
}

//=========================================================================
// Unit Tests
//=========================================================================
