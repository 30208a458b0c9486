//=========================================================================
// Scene Slot
//=========================================================================
//
// The window's record of its active scene.
//
// The scene object is taken out of the slot while one of its callbacks
// runs, so the callback can receive `&mut Window`. `scene` is therefore
// `None` only during such a call.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Scene, SceneArgs, SceneHooks};

//=== SceneSlot ===========================================================

pub(crate) struct SceneSlot {
    pub(crate) name: String,
    pub(crate) args: SceneArgs,
    pub(crate) scene: Option<Box<dyn Scene>>,
    pub(crate) hooks: SceneHooks,
}

impl SceneSlot {
    pub(crate) fn new(name: String, args: SceneArgs, scene: Box<dyn Scene>) -> Self {
        Self {
            name,
            args,
            scene: Some(scene),
            hooks: SceneHooks::new(),
        }
    }
}
