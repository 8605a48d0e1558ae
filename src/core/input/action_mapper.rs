//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps raw keys and mouse buttons to game actions.
//
// Architecture:
//   key / button → HashMap → GameAction
//
// Several inputs may share an action (W and ↑ both move up); each input
// maps to at most one action.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    action::GameAction,
    event::{KeyCode, MouseButton},
};

//=== ActionMapper ========================================================

pub(crate) struct ActionMapper {
    key_bindings: HashMap<KeyCode, GameAction>,
    mouse_bindings: HashMap<MouseButton, GameAction>,
}

impl ActionMapper {
    /// Creates a mapper with no bindings.
    pub(crate) fn new() -> Self {
        Self {
            key_bindings: HashMap::new(),
            mouse_bindings: HashMap::new(),
        }
    }

    /// Creates a mapper with the game's default bindings.
    pub(crate) fn with_defaults() -> Self {
        let mut mapper = Self::new();

        mapper.bind_key(KeyCode::KeyW, GameAction::MoveUp);
        mapper.bind_key(KeyCode::ArrowUp, GameAction::MoveUp);
        mapper.bind_key(KeyCode::KeyS, GameAction::MoveDown);
        mapper.bind_key(KeyCode::ArrowDown, GameAction::MoveDown);
        mapper.bind_key(KeyCode::KeyA, GameAction::MoveLeft);
        mapper.bind_key(KeyCode::ArrowLeft, GameAction::MoveLeft);
        mapper.bind_key(KeyCode::KeyD, GameAction::MoveRight);
        mapper.bind_key(KeyCode::ArrowRight, GameAction::MoveRight);

        mapper.bind_key(KeyCode::KeyE, GameAction::Interact);
        mapper.bind_key(KeyCode::Enter, GameAction::Interact);
        mapper.bind_mouse(MouseButton::Left, GameAction::Interact);

        mapper.bind_key(KeyCode::Escape, GameAction::Menu);
        mapper.bind_key(KeyCode::Space, GameAction::Menu);

        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key, replacing its previous action.
    pub(crate) fn bind_key(&mut self, key: KeyCode, action: GameAction) {
        self.key_bindings.insert(key, action);
    }

    /// Binds a mouse button, replacing its previous action.
    pub(crate) fn bind_mouse(&mut self, button: MouseButton, action: GameAction) {
        self.mouse_bindings.insert(button, action);
    }

    pub(crate) fn unbind_key(&mut self, key: KeyCode) {
        self.key_bindings.remove(&key);
    }

    pub(crate) fn unbind_mouse(&mut self, button: MouseButton) {
        self.mouse_bindings.remove(&button);
    }

    //--- Mapping ----------------------------------------------------------

    pub(crate) fn map_key(&self, key: KeyCode) -> Option<GameAction> {
        self.key_bindings.get(&key).copied()
    }

    pub(crate) fn map_button(&self, button: MouseButton) -> Option<GameAction> {
        self.mouse_bindings.get(&button).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mapper_has_no_bindings() {
        let mapper = ActionMapper::new();
        assert_eq!(mapper.map_key(KeyCode::KeyW), None);
        assert_eq!(mapper.map_button(MouseButton::Left), None);
    }

    #[test]
    fn default_bindings_cover_every_action() {
        let mapper = ActionMapper::with_defaults();

        assert_eq!(mapper.map_key(KeyCode::KeyW), Some(GameAction::MoveUp));
        assert_eq!(mapper.map_key(KeyCode::ArrowDown), Some(GameAction::MoveDown));
        assert_eq!(mapper.map_key(KeyCode::KeyA), Some(GameAction::MoveLeft));
        assert_eq!(mapper.map_key(KeyCode::ArrowRight), Some(GameAction::MoveRight));
        assert_eq!(mapper.map_key(KeyCode::Enter), Some(GameAction::Interact));
        assert_eq!(mapper.map_button(MouseButton::Left), Some(GameAction::Interact));
        assert_eq!(mapper.map_key(KeyCode::Space), Some(GameAction::Menu));
        assert_eq!(mapper.map_key(KeyCode::Unidentified), None);
        assert_eq!(mapper.map_button(MouseButton::Right), None);
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut mapper = ActionMapper::with_defaults();
        mapper.bind_key(KeyCode::Space, GameAction::Interact);

        assert_eq!(mapper.map_key(KeyCode::Space), Some(GameAction::Interact));
    }

    #[test]
    fn unbinding_removes_only_that_input() {
        let mut mapper = ActionMapper::with_defaults();
        mapper.unbind_key(KeyCode::KeyE);
        mapper.unbind_mouse(MouseButton::Left);

        assert_eq!(mapper.map_key(KeyCode::KeyE), None);
        assert_eq!(mapper.map_button(MouseButton::Left), None);
        assert_eq!(mapper.map_key(KeyCode::Enter), Some(GameAction::Interact));
    }
}
