//=========================================================================
// Signal
//=========================================================================
//
// Typed callback registry owned by a producer.
//
// Consumers connect at construction time; the producer emits synchronously
// from inside its own tick step. Slots are reference counted so a signal
// can be cloned into every instance a factory produces.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

//=== Signal ==============================================================

type Slot<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Producer-owned list of subscribers for events of type `E`.
pub struct Signal<E> {
    slots: Vec<Slot<E>>,
}

impl<E> Signal<E> {
    /// Creates a signal with no subscribers.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Subscribes `slot` to every future emission.
    pub fn connect<F>(&mut self, slot: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.slots.push(Arc::new(slot));
    }

    /// Calls every subscriber in connection order.
    pub fn emit(&self, event: &E) {
        for slot in &self.slots {
            slot(event);
        }
    }

    /// Number of connected subscribers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E> Clone for Signal<E> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.slots.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
