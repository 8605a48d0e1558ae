//=========================================================================
// Message Bus
//=========================================================================
//
// Per-tick, type-keyed message queues shared by systems and scenes.
//
// Architecture:
//   InputSystem  → push<InputSignal>()  ┐
//   Scenes       → push<SceneRequest>() ┼→ HashMap<TypeId, Vec<M>>
//                                       ┘         ↓
//   Active scene ← read<InputSignal>()      SceneManager ← drain<SceneRequest>()
//
// Pattern: push → read (N consumers) → clear/drain → repeat
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

//=== Module Declarations =================================================

mod message_queue;

//=== Internal Dependencies ===============================================

use message_queue::MessageQueue;

//=== Message Trait =======================================================

/// Marker trait for anything that can travel on the [`MessageBus`].
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// Batches messages by type between tick phases.
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Message Operations -----------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        queue
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
            .expect("Type mismatch in MessageBus queue")
            .push(msg);
    }

    /// All queued messages of type `M`, oldest first.
    ///
    /// Messages stay queued until cleared or drained, so several consumers
    /// can read the same batch.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Removes and returns every queued message of type `M`.
    ///
    /// Used by single consumers that may cause new messages of the same type
    /// to be pushed while handling the batch.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(|v| v.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    /// Number of queued messages of type `M`.
    pub fn count<M: Message>(&self) -> usize {
        self.read::<M>().len()
    }

    /// Clears messages of type `M`.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping allocations for the next tick.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    /// Total messages queued across all types.
    pub fn total(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }
}

impl Default for MessageBus {
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
    use crate::core::input::InputSignal;
    use crate::core::scene::{SceneId, SceneRequest};

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert_eq!(bus.count::<SceneRequest>(), 0);
        assert!(bus.read::<InputSignal>().is_empty());
        assert_eq!(bus.total(), 0);
    }

    #[test]
    fn queues_are_separate_per_type() {
        let mut bus = MessageBus::new();
        bus.push(SceneRequest(SceneId::Town));
        bus.push(InputSignal::MenuPressed);
        bus.push(SceneRequest(SceneId::Battle));

        assert_eq!(
            bus.read::<SceneRequest>(),
            &[SceneRequest(SceneId::Town), SceneRequest(SceneId::Battle)]
        );
        assert_eq!(bus.read::<InputSignal>(), &[InputSignal::MenuPressed]);
        assert_eq!(bus.total(), 3);
    }

    #[test]
    fn read_does_not_consume() {
        let mut bus = MessageBus::new();
        bus.push(InputSignal::InteractPressed);

        assert_eq!(bus.read::<InputSignal>().len(), 1);
        assert_eq!(bus.read::<InputSignal>().len(), 1);
    }

    #[test]
    fn drain_empties_only_that_type() {
        let mut bus = MessageBus::new();
        bus.push(SceneRequest(SceneId::Home));
        bus.push(InputSignal::MenuPressed);

        let drained = bus.drain::<SceneRequest>();

        assert_eq!(drained, vec![SceneRequest(SceneId::Home)]);
        assert_eq!(bus.count::<SceneRequest>(), 0);
        assert_eq!(bus.count::<InputSignal>(), 1);
        assert!(bus.drain::<u64>().is_empty());
    }

    #[test]
    fn clear_and_clear_all() {
        let mut bus = MessageBus::new();
        bus.push(SceneRequest(SceneId::Home));
        bus.push(InputSignal::InteractPressed);

        bus.clear::<InputSignal>();
        assert_eq!(bus.count::<InputSignal>(), 0);
        assert_eq!(bus.count::<SceneRequest>(), 1);

        bus.clear_all();
        assert_eq!(bus.total(), 0);
    }
}
