//=========================================================================
// State Tracker
//=========================================================================
//
// Held-input tracking with per-tick press deltas.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//                                  → Vec<Press> (keys and buttons, one order)
//
// Tick lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== Press ===============================================================

/// A key or button that went down this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Key(KeyCode),
    Button(MouseButton),
}

//=== StateTracker ========================================================

/// Tracks persistent state (inputs held) and per-tick presses.
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) -----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,

    //--- Tick Deltas (reset via clear()) ---------------------------------
    presses: Vec<Press>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            presses: Vec::new(),
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears the presses recorded for the previous tick.
    pub(super) fn clear(&mut self) {
        self.presses.clear();
    }

    /// Applies a batch of events in arrival order.
    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                // Only a transition counts as a press
                if self.keys_down.insert(key) {
                    self.presses.push(Press::Key(key));
                }
            }
            InputEvent::KeyUp(key) => {
                self.keys_down.remove(&key);
            }
            InputEvent::MouseButtonDown(button) => {
                if self.buttons_down.insert(button) {
                    self.presses.push(Press::Button(button));
                }
            }
            InputEvent::MouseButtonUp(button) => {
                self.buttons_down.remove(&button);
            }
        }
    }

    //--- Query API --------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_down.iter()
    }

    /// Keys and buttons that went down this tick, in arrival order.
    pub fn presses(&self) -> &[Press] {
        &self.presses
    }
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
