//=========================================================================
// Game Actions & Input Signals
//=========================================================================
//
// Actions: what a bound key or button means to the game.
// Signals: what scenes actually receive each tick.
//
//   KeyCode / MouseButton ──ActionMapper──▶ GameAction
//   GameAction (pressed / held) ──InputSystem──▶ InputSignal
//
//=========================================================================

//=== GameAction ==========================================================

/// Semantic meaning of a bound input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interact,
    Menu,
}

impl GameAction {
    /// Unit contribution of a held movement action, in screen axes
    /// (x grows right, y grows down). `None` for non-movement actions.
    pub fn axis(self) -> Option<(f32, f32)> {
        match self {
            Self::MoveUp => Some((0.0, -1.0)),
            Self::MoveDown => Some((0.0, 1.0)),
            Self::MoveLeft => Some((-1.0, 0.0)),
            Self::MoveRight => Some((1.0, 0.0)),
            Self::Interact | Self::Menu => None,
        }
    }
}

//=== Direction ===========================================================

/// Normalized movement direction in screen axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Direction {
    pub x: f32,
    pub y: f32,
}

impl Direction {
    pub const NONE: Self = Self { x: 0.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: -1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: 1.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };

    /// Builds a direction from a raw axis sum, scaling it to unit length.
    pub fn from_axes(x: f32, y: f32) -> Self {
        let length = (x * x + y * y).sqrt();
        if length == 0.0 {
            Self::NONE
        } else {
            Self {
                x: x / length,
                y: y / length,
            }
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    pub fn points_up(&self) -> bool {
        self.y < 0.0
    }

    pub fn points_down(&self) -> bool {
        self.y > 0.0
    }

    pub fn points_left(&self) -> bool {
        self.x < 0.0
    }

    pub fn points_right(&self) -> bool {
        self.x > 0.0
    }
}

//=== InputSignal =========================================================

/// Abstract input event published on the message bus for scenes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputSignal {
    InteractPressed,
    MenuPressed,

    /// Held movement changed. Emitted only when the direction differs from
    /// the previous one, including the change back to [`Direction::NONE`].
    DirectionChanged(Direction),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonals_are_normalized() {
        let d = Direction::from_axes(1.0, -1.0);
        assert!((d.x * d.x + d.y * d.y - 1.0).abs() < 1e-6);
        assert!(d.points_right() && d.points_up());
    }

    #[test]
    fn opposing_axes_cancel() {
        assert!(Direction::from_axes(0.0, 0.0).is_none());
        assert_eq!(Direction::from_axes(0.0, 2.0), Direction::DOWN);
    }

    #[test]
    fn only_movement_actions_have_axes() {
        assert_eq!(GameAction::MoveLeft.axis(), Some((-1.0, 0.0)));
        assert_eq!(GameAction::Interact.axis(), None);
        assert_eq!(GameAction::Menu.axis(), None);
    }
}
