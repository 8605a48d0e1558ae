//=========================================================================
// Input Event Types
//=========================================================================
//
// Platform-independent representation of the raw input the game reacts to.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (held / pressed this tick)
//         ↓
//    InputSignal (Interact, Menu, DirectionChanged)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Only the left button carries a default binding (interact). The rest
/// can still be bound at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// WASD stays in place on AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Movement ---------------------------------------------------------

    KeyW,
    KeyA,
    KeyS,
    KeyD,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Actions ----------------------------------------------------------

    /// Interact
    KeyE,

    /// Interact
    Enter,

    /// Menu
    Escape,

    /// Menu
    Space,

    //--- Fallback ---------------------------------------------------------

    /// Any key the game has no use for.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Discrete input transition reported by the platform layer.
///
/// Key repeats never reach this type: the platform drops them, so every
/// `KeyDown` is a real press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),
}

impl InputEvent {
    /// Whether this event starts a press.
    pub fn is_press(&self) -> bool {
        matches!(self, Self::KeyDown(_) | Self::MouseButtonDown(_))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
