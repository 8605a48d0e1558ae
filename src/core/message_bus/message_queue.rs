//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view over the per-type `Vec<M>` queues held by MessageBus.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

/// Type-erased queue storage.
///
/// Lets the bus clear every queue at a tick boundary without knowing the
/// concrete message types.
pub(super) trait MessageQueue: Send {
    /// Clears all messages while keeping the allocation.
    fn clear_queue(&mut self);

    /// Number of queued messages.
    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
