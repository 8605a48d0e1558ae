//=========================================================================
// Input System
//=========================================================================
//
// Turns the platform's raw input batches into the three abstract signals
// scenes consume.
//
// Architecture:
//   Vec<Vec<InputEvent>> → StateTracker → ActionMapper → InputSignal
//
// Per tick:
//   - every bound press of Interact / Menu yields one signal, in order
//   - the held movement actions are summed and normalized; a
//     DirectionChanged signal follows only when the result changed
//
// Owned by GlobalSystems. Its signals are published on the message bus
// before the active scene updates.
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod action_mapper;
mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use action::{Direction, GameAction, InputSignal};
pub use event::{InputEvent, KeyCode, MouseButton};
pub use state_tracker::{Press, StateTracker};

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use action_mapper::ActionMapper;

//=== InputSystem =========================================================

/// Input processing with rebindable keys and change-only direction
/// signalling.
pub struct InputSystem {
    state: StateTracker,
    mapper: ActionMapper,
    direction: Direction,
    signals: Vec<InputSignal>,
}

impl InputSystem {
    /// Creates a system with the default bindings.
    pub fn new() -> Self {
        Self {
            state: StateTracker::new(),
            mapper: ActionMapper::with_defaults(),
            direction: Direction::NONE,
            signals: Vec::new(),
        }
    }

    //--- Binding API ------------------------------------------------------

    pub fn bind_key(&mut self, key: KeyCode, action: GameAction) {
        self.mapper.bind_key(key, action);
    }

    pub fn bind_mouse(&mut self, button: MouseButton, action: GameAction) {
        self.mapper.bind_mouse(button, action);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.mapper.unbind_key(key);
    }

    pub fn unbind_mouse(&mut self, button: MouseButton) {
        self.mapper.unbind_mouse(button);
    }

    //--- Tick Processing --------------------------------------------------

    /// Processes every batch received since the previous tick and
    /// replaces the signal list.
    pub fn process_frame(&mut self, batches: &[Vec<InputEvent>]) {
        self.state.clear();
        self.signals.clear();

        for batch in batches {
            self.state.process_events(batch);
        }

        for press in self.state.presses() {
            let action = match *press {
                Press::Key(key) => self.mapper.map_key(key),
                Press::Button(button) => self.mapper.map_button(button),
            };
            match action {
                Some(GameAction::Interact) => self.signals.push(InputSignal::InteractPressed),
                Some(GameAction::Menu) => self.signals.push(InputSignal::MenuPressed),
                _ => {}
            }
        }

        let held = self.held_direction();
        if held != self.direction {
            self.direction = held;
            self.signals.push(InputSignal::DirectionChanged(held));
        }

        if !self.signals.is_empty() {
            trace!("Input signals: {:?}", self.signals);
        }
    }

    //--- Query API --------------------------------------------------------

    /// Signals produced by the last [`InputSystem::process_frame`].
    pub fn signals(&self) -> &[InputSignal] {
        &self.signals
    }

    /// Current normalized direction of held movement inputs.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    //--- Internal Helpers -------------------------------------------------

    fn held_direction(&self) -> Direction {
        let keys = self.state.keys_down().filter_map(|k| self.mapper.map_key(*k));
        let buttons = self.state.buttons_down().filter_map(|b| self.mapper.map_button(*b));

        // Two keys bound to the same action count once.
        let held: HashSet<GameAction> = keys.chain(buttons).collect();

        let (x, y) = held
            .iter()
            .filter_map(|action| action.axis())
            .fold((0.0, 0.0), |(x, y), (dx, dy)| (x + dx, y + dy));

        Direction::from_axes(x, y)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(system: &mut InputSystem, events: &[InputEvent]) -> Vec<InputSignal> {
        system.process_frame(&[events.to_vec()]);
        system.signals().to_vec()
    }

    #[test]
    fn interact_and_menu_presses_become_signals() {
        let mut input = InputSystem::new();

        let signals = frame(
            &mut input,
            &[
                InputEvent::KeyDown(KeyCode::KeyE),
                InputEvent::KeyDown(KeyCode::Escape),
            ],
        );

        assert_eq!(signals, vec![InputSignal::InteractPressed, InputSignal::MenuPressed]);
    }

    #[test]
    fn mouse_left_interacts() {
        let mut input = InputSystem::new();

        let signals = frame(&mut input, &[InputEvent::MouseButtonDown(MouseButton::Left)]);

        assert_eq!(signals, vec![InputSignal::InteractPressed]);
    }

    #[test]
    fn click_then_escape_keeps_arrival_order() {
        let mut input = InputSystem::new();

        let signals = frame(
            &mut input,
            &[
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::KeyDown(KeyCode::Escape),
            ],
        );

        assert_eq!(signals, vec![InputSignal::InteractPressed, InputSignal::MenuPressed]);
    }

    #[test]
    fn holding_a_key_signals_once() {
        let mut input = InputSystem::new();

        assert_eq!(
            frame(&mut input, &[InputEvent::KeyDown(KeyCode::Enter)]),
            vec![InputSignal::InteractPressed]
        );
        assert!(frame(&mut input, &[]).is_empty());
    }

    #[test]
    fn direction_is_signalled_only_on_change() {
        let mut input = InputSystem::new();

        assert_eq!(
            frame(&mut input, &[InputEvent::KeyDown(KeyCode::KeyW)]),
            vec![InputSignal::DirectionChanged(Direction::UP)]
        );
        assert!(frame(&mut input, &[]).is_empty());

        // Arrow bound to the same action does not change anything.
        assert!(frame(&mut input, &[InputEvent::KeyDown(KeyCode::ArrowUp)]).is_empty());

        assert!(frame(&mut input, &[InputEvent::KeyUp(KeyCode::KeyW)]).is_empty());
        assert_eq!(
            frame(&mut input, &[InputEvent::KeyUp(KeyCode::ArrowUp)]),
            vec![InputSignal::DirectionChanged(Direction::NONE)]
        );
    }

    #[test]
    fn opposite_keys_cancel_out() {
        let mut input = InputSystem::new();
        frame(&mut input, &[InputEvent::KeyDown(KeyCode::KeyA)]);

        let signals = frame(&mut input, &[InputEvent::KeyDown(KeyCode::KeyD)]);

        assert_eq!(signals, vec![InputSignal::DirectionChanged(Direction::NONE)]);
        assert!(input.direction().is_none());
    }

    #[test]
    fn multiple_batches_are_processed_in_order() {
        let mut input = InputSystem::new();

        input.process_frame(&[
            vec![InputEvent::KeyDown(KeyCode::KeyD)],
            vec![InputEvent::KeyDown(KeyCode::KeyE)],
        ]);

        assert_eq!(
            input.signals(),
            &[
                InputSignal::InteractPressed,
                InputSignal::DirectionChanged(Direction::RIGHT)
            ]
        );
    }

    #[test]
    fn rebound_key_follows_new_action() {
        let mut input = InputSystem::new();
        input.unbind_key(KeyCode::Space);
        input.bind_mouse(MouseButton::Right, GameAction::Menu);

        assert!(frame(&mut input, &[InputEvent::KeyDown(KeyCode::Space)]).is_empty());
        assert_eq!(
            frame(&mut input, &[InputEvent::MouseButtonDown(MouseButton::Right)]),
            vec![InputSignal::MenuPressed]
        );
    }
}
