//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard and mouse button events into InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputBuffer
//
// Key repeats and keys the game has no use for are filtered out
// (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Stateless Winit → InputEvent converter.
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a Winit KeyEvent, dropping repeats and unmapped keys.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        self.process_key(key, key_event.state)
    }

    /// Converts a physical key transition.
    pub(crate) fn process_key(&self, key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }

    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> InputEvent {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(button),
            ElementState::Released => InputEvent::MouseButtonUp(button),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps the movement and action keys. Everything else is `Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        match code {
            WinitKeyCode::KeyW => KeyCode::KeyW,
            WinitKeyCode::KeyA => KeyCode::KeyA,
            WinitKeyCode::KeyS => KeyCode::KeyS,
            WinitKeyCode::KeyD => KeyCode::KeyD,

            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,

            WinitKeyCode::KeyE => KeyCode::KeyE,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Space => KeyCode::Space,

            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
