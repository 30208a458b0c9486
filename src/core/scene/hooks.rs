//=========================================================================
// Scene Hooks
//=========================================================================
//
// Hooks owned by a scene. They live in the scene's local list for the
// scene's whole lifetime and are mirrored into the window's registry only
// while the scene is active.
//
//   activate()   → insert every local hook not already registered
//   deactivate() → remove every local hook from the registry
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::event::{EventHook, HookId, HookRegistry};

//=== SceneHooks ==========================================================

#[derive(Debug, Default)]
pub struct SceneHooks {
    hooks: Vec<Rc<EventHook>>,
    active: bool,
}

impl SceneHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook to the local list, registering it right away when the
    /// hooks are active.
    pub fn add(&mut self, hook: Rc<EventHook>, registry: &mut HookRegistry) {
        if self.active {
            registry.insert(Rc::clone(&hook));
        }
        self.hooks.push(hook);
    }

    /// Removes a hook from the local list and the registry.
    pub fn remove(&mut self, id: HookId, registry: &mut HookRegistry) -> bool {
        let Some(pos) = self.hooks.iter().position(|hook| hook.id() == id) else {
            return false;
        };
        self.hooks.remove(pos);
        registry.remove(id);
        true
    }

    /// Mirrors every local hook into the registry. Idempotent.
    pub fn activate(&mut self, registry: &mut HookRegistry) {
        for hook in &self.hooks {
            registry.insert(Rc::clone(hook));
        }
        self.active = true;
    }

    /// Removes every local hook from the registry.
    pub fn deactivate(&mut self, registry: &mut HookRegistry) {
        for hook in &self.hooks {
            registry.remove(hook.id());
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
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

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::{EventType, HookData};

    fn local_hook(registry: &mut HookRegistry, name: &str) -> Rc<EventHook> {
        registry.create(name, EventType::KeyDown, vec![], HookData::new())
    }

    #[test]
    fn inactive_hooks_stay_local() {
        let mut registry = HookRegistry::new();
        let mut hooks = SceneHooks::new();

        let hook = local_hook(&mut registry, "jump");
        hooks.add(hook, &mut registry);

        assert_eq!(hooks.len(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn activate_twice_registers_each_hook_once() {
        let mut registry = HookRegistry::new();
        let mut hooks = SceneHooks::new();
        let a = local_hook(&mut registry, "a");
        let b = local_hook(&mut registry, "b");
        hooks.add(Rc::clone(&a), &mut registry);
        hooks.add(Rc::clone(&b), &mut registry);

        hooks.activate(&mut registry);
        hooks.activate(&mut registry);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().filter(|h| h.id() == a.id()).count(), 1);
        assert_eq!(registry.iter().filter(|h| h.id() == b.id()).count(), 1);
    }

    #[test]
    fn activate_keeps_global_hooks() {
        let mut registry = HookRegistry::new();
        let global = registry.add("global", EventType::Quit, vec![], HookData::new());
        let mut hooks = SceneHooks::new();
        hooks.add(local_hook(&mut registry, "local"), &mut registry);

        hooks.activate(&mut registry);
        hooks.deactivate(&mut registry);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(global.id()));
    }

    #[test]
    fn hooks_added_while_active_are_mirrored() {
        let mut registry = HookRegistry::new();
        let mut hooks = SceneHooks::new();
        hooks.activate(&mut registry);

        let hook = local_hook(&mut registry, "late");
        hooks.add(Rc::clone(&hook), &mut registry);

        assert!(registry.contains(hook.id()));
    }

    #[test]
    fn deactivate_removes_all_local_hooks() {
        let mut registry = HookRegistry::new();
        let mut hooks = SceneHooks::new();
        hooks.add(local_hook(&mut registry, "a"), &mut registry);
        hooks.add(local_hook(&mut registry, "b"), &mut registry);
        hooks.activate(&mut registry);

        hooks.deactivate(&mut registry);

        assert!(registry.is_empty());
        assert_eq!(hooks.len(), 2);
        assert!(!hooks.is_active());
    }

    #[test]
    fn remove_drops_local_and_registered_copy() {
        let mut registry = HookRegistry::new();
        let mut hooks = SceneHooks::new();
        let hook = local_hook(&mut registry, "a");
        hooks.add(Rc::clone(&hook), &mut registry);
        hooks.activate(&mut registry);

        assert!(hooks.remove(hook.id(), &mut registry));
        assert!(!hooks.remove(hook.id(), &mut registry));
        assert!(registry.is_empty());
        assert!(hooks.is_empty());
    }
}
