//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side end of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → poll() → FramePoll::Inputs(batches)
//                                    → FramePoll::Exit(reason)
//
// A poll never blocks and drains at most MAX_EVENTS_PER_POLL messages so a
// flooded channel cannot stall the tick. Leftovers wait for the next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_POLL: usize = 100;

//=== FramePoll ===========================================================

/// Why the logic thread should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExitReason {
    /// The platform reported the window closing.
    WindowClosed,

    /// Every sender is gone (platform exited or panicked).
    Disconnected,
}

/// Result of polling the channel once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FramePoll {
    /// Non-empty input batches in arrival order. May be empty.
    Inputs(Vec<Vec<InputEvent>>),

    /// Stop ticking. Input received in the same poll is discarded.
    Exit(ExitReason),
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver }
    }

    /// Drains pending platform messages for this tick.
    pub(crate) fn poll(&self) -> FramePoll {
        let mut batches = Vec::new();

        for drained in 0..MAX_EVENTS_PER_POLL {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) => {
                    if !batch.is_empty() {
                        batches.push(batch);
                    }
                }
                Ok(PlatformEvent::WindowClosed) => return FramePoll::Exit(ExitReason::WindowClosed),
                Err(TryRecvError::Disconnected) => return FramePoll::Exit(ExitReason::Disconnected),
                Err(TryRecvError::Empty) => return FramePoll::Inputs(batches),
            }

            if drained + 1 == MAX_EVENTS_PER_POLL && !self.receiver.is_empty() {
                warn!("Platform backlog: {} messages left for the next tick", self.receiver.len());
            }
        }

        FramePoll::Inputs(batches)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
