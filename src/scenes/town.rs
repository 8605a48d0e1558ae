//=========================================================================
// City Scene
//=========================================================================
//
// The town. Interact looks for trouble (starts a battle), menu heads home.
// The scene ships without a camera.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::InputSignal;
use crate::core::scene::{Scene, SceneId, SceneNode};

//=== CityScene ===========================================================

pub struct CityScene {
    root: SceneNode,
}

impl CityScene {
    pub fn new() -> Self {
        let root = SceneNode::container("CityScene")
            .with_child(SceneNode::label("Title", "City"))
            .with_child(SceneNode::label("Hint", "E: look for trouble    Esc: return to the dojo"));

        Self { root }
    }
}

impl Default for CityScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CityScene {
    fn root(&self) -> &SceneNode {
        &self.root
    }

    fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    fn update(&mut self, context: &mut GlobalContext) {
        for signal in context.input_signals().to_vec() {
            match signal {
                InputSignal::MenuPressed => context.request_scene_change(SceneId::Main),
                InputSignal::InteractPressed => context.request_scene_change(SceneId::Battle),
                InputSignal::DirectionChanged(_) => {}
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneRequest;

    #[test]
    fn menu_goes_home_and_interact_starts_a_battle() {
        let mut context = GlobalContext::new();
        let mut scene = CityScene::new();
        context.message_bus.push(InputSignal::MenuPressed);
        context.message_bus.push(InputSignal::InteractPressed);

        scene.update(&mut context);

        assert_eq!(
            context.message_bus.read::<SceneRequest>(),
            &[SceneRequest(SceneId::Main), SceneRequest(SceneId::Battle)]
        );
    }

    #[test]
    fn anchor_is_synthesized() {
        let mut scene = CityScene::new();
        let anchor = scene.root_mut().resolve_anchor();

        assert!(anchor.synthesized);
        assert_eq!(anchor.path, "BackupCamera2D");
    }
}
