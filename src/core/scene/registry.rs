//=========================================================================
// Scene Registry
//=========================================================================
//
// Maps scene names to the factories that construct them.
//
// Scenes are not kept alive between activations: entering a scene always
// runs its factory again with the arguments given to change_scene. The
// registry keeps insertion order so the first registered scene can serve
// as the default start scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneArgs};
use crate::core::window::Window;

//=== SceneFactory ========================================================

/// Constructs a scene from its owning window and arguments.
pub type SceneFactory = Rc<dyn Fn(&mut Window, &SceneArgs) -> Box<dyn Scene>>;

//=== SceneRegistry =======================================================

/// Name → factory mapping in registration order.
#[derive(Default)]
pub struct SceneRegistry {
    entries: Vec<(String, SceneFactory)>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a factory under `name`.
    ///
    /// Registering a name twice replaces the factory but keeps the name's
    /// original position.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&mut Window, &SceneArgs) -> Box<dyn Scene> + 'static,
    {
        let name = name.into();
        let factory: SceneFactory = Rc::new(factory);

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => {
                warn!(target: "scene", "Scene '{}' was already registered and has been replaced", name);
                entry.1 = factory;
            }
            None => {
                debug!(target: "scene", "Registered scene '{}'", name);
                self.entries.push((name, factory));
            }
        }
    }

    /// Removes a registration. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| existing != name);
        before != self.entries.len()
    }

    //--- Lookup -----------------------------------------------------------

    /// Factory registered under `name`.
    pub fn get(&self, name: &str) -> Option<SceneFactory> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, factory)| Rc::clone(factory))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    /// Name of the earliest registration still present.
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|(name, _)| name.as_str())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SceneRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl Scene for Empty {}

    fn empty(_: &mut Window, _: &SceneArgs) -> Box<dyn Scene> {
        Box::new(Empty)
    }

    #[test]
    fn keeps_registration_order() {
        let mut registry = SceneRegistry::new();
        registry.register("menu", empty);
        registry.register("game", empty);
        registry.register("credits", empty);

        assert_eq!(registry.first(), Some("menu"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["menu", "game", "credits"]);
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut registry = SceneRegistry::new();
        registry.register("menu", empty);
        registry.register("game", empty);
        registry.register("menu", empty);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.first(), Some("menu"));
    }

    #[test]
    fn lookup() {
        let mut registry = SceneRegistry::new();
        registry.register("menu", empty);

        assert!(registry.contains("menu"));
        assert!(registry.get("menu").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn unregister() {
        let mut registry = SceneRegistry::new();
        registry.register("menu", empty);
        registry.register("game", empty);

        assert!(registry.unregister("menu"));
        assert!(!registry.unregister("menu"));
        assert_eq!(registry.first(), Some("game"));
    }

    #[test]
    fn empty_registry_has_no_first() {
        let registry = SceneRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.first(), None);
    }
}
