//=========================================================================
// Event Hooks
//=========================================================================
//
// Bindings from event types to handler callbacks.
//
// Architecture:
//   HookRegistry
//     ├─ hooks: Vec<Rc<EventHook>>   (registration order)
//     └─ next_id                     (ids never reused)
//
// Hooks are immutable once created. The registry hands out Rc clones so a
// dispatcher can release its borrow of the registry before running
// handlers that need `&mut Window`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

use log::debug;
use serde_json::{Map, Value};

//=== Internal Dependencies ===============================================

use super::{Event, EventType, IntoEventTypes};
use crate::core::window::Window;

//=== Types ===============================================================

/// Free-form data handed to every handler of a hook.
pub type HookData = Map<String, Value>;

/// Callback invoked for every matching event.
///
/// An `Err` is logged by the dispatcher and does not stop the frame.
pub type Handler = Rc<dyn Fn(&Event, &mut Window, &HookData) -> anyhow::Result<()>>;

/// Wraps a closure into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Event, &mut Window, &HookData) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

//=== HookId ==============================================================

/// Unique identifier of a hook within the registry that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== EventHook ===========================================================

/// An immutable binding of event types to handlers plus data.
pub struct EventHook {
    id: HookId,
    name: String,
    events: Vec<EventType>,
    handlers: Vec<Handler>,
    data: HookData,
}

impl EventHook {
    pub fn id(&self) -> HookId {
        self.id
    }

    /// Human-readable name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribed event types, in subscription order.
    pub fn events(&self) -> &[EventType] {
        &self.events
    }

    /// Handlers, in the order they run.
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn data(&self) -> &HookData {
        &self.data
    }

    /// Whether this hook fires for events of `event_type`.
    pub fn matches(&self, event_type: EventType) -> bool {
        self.events.contains(&event_type)
    }
}

impl fmt::Debug for EventHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHook")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("events", &self.events)
            .field("handlers", &self.handlers.len())
            .field("data", &self.data)
            .finish()
    }
}

//=== HookRegistry ========================================================

/// Ordered list of active hooks.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Rc<EventHook>>,
    next_id: u64,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Creation ---------------------------------------------------------

    /// Creates a hook with a fresh id and appends it to the registry.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        events: impl IntoEventTypes,
        handlers: Vec<Handler>,
        data: HookData,
    ) -> Rc<EventHook> {
        let hook = self.create(name, events, handlers, data);
        self.insert(Rc::clone(&hook));
        hook
    }

    /// Creates a hook with a fresh id without registering it.
    ///
    /// Used for hooks that are owned elsewhere (scene-local hooks) and only
    /// mirrored into the registry while their owner is active.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        events: impl IntoEventTypes,
        handlers: Vec<Handler>,
        data: HookData,
    ) -> Rc<EventHook> {
        let id = HookId(self.next_id);
        self.next_id += 1;

        Rc::new(EventHook {
            id,
            name: name.into(),
            events: events.into_event_types(),
            handlers,
            data,
        })
    }

    //--- Membership -------------------------------------------------------

    /// Appends an existing hook unless one with the same id is present.
    ///
    /// Returns whether the hook was inserted.
    pub fn insert(&mut self, hook: Rc<EventHook>) -> bool {
        if self.contains(hook.id()) {
            return false;
        }
        debug!(
            target: "hooks",
            "Registered hook '{}' {} for {:?}",
            hook.name(),
            hook.id(),
            hook.events()
        );
        self.hooks.push(hook);
        true
    }

    /// Removes a hook by id. Returns whether it was found.
    pub fn remove(&mut self, id: HookId) -> bool {
        match self.hooks.iter().position(|hook| hook.id() == id) {
            Some(pos) => {
                let hook = self.hooks.remove(pos);
                debug!(target: "hooks", "Removed hook '{}' {}", hook.name(), id);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: HookId) -> bool {
        self.hooks.iter().any(|hook| hook.id() == id)
    }

    pub fn get(&self, id: HookId) -> Option<&Rc<EventHook>> {
        self.hooks.iter().find(|hook| hook.id() == id)
    }

    //--- Queries ----------------------------------------------------------

    /// Hooks subscribed to `event_type`, in registration order.
    pub fn matching(&self, event_type: EventType) -> Vec<Rc<EventHook>> {
        self.hooks
            .iter()
            .filter(|hook| hook.matches(event_type))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<EventHook>> {
        self.hooks.iter()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.hooks.iter()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
