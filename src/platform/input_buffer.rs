//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store for input collected between two redraws.
//
// Events keep arrival order. An identical event directly following
// itself is dropped (a key cannot go down twice without going up).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 32;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Takes this frame's events, or `None` when nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.events))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, MouseButton};

    #[test]
    fn drain_of_empty_buffer_is_none() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn keeps_arrival_order() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyW));
        buffer.push(InputEvent::MouseButtonDown(MouseButton::Left));
        buffer.push(InputEvent::KeyUp(KeyCode::KeyW));

        assert_eq!(
            buffer.drain(),
            Some(vec![
                InputEvent::KeyDown(KeyCode::KeyW),
                InputEvent::MouseButtonDown(MouseButton::Left),
                InputEvent::KeyUp(KeyCode::KeyW),
            ])
        );
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyE));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyE));
        buffer.push(InputEvent::KeyUp(KeyCode::KeyE));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyE));

        assert_eq!(buffer.drain().map(|events| events.len()), Some(3));
    }
}
