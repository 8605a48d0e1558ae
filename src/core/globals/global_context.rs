//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains state data that scenes read/write:
// - message_bus: this tick's input signals and scene requests
// - scheduler: deferred calls and timers
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, InputSignal};
use crate::core::message_bus::MessageBus;
use crate::core::scene::{SceneId, SceneRequest, SceneTimer};
use crate::core::scheduler::{Scheduler, Task, TimerHandle};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
///
/// Scenes receive `&mut GlobalContext` in every lifecycle method. This
/// separates scene-accessible data from the engine systems that own the
/// scenes.
pub struct GlobalContext {
    /// Per-tick message queues.
    ///
    /// Holds the [`InputSignal`]s of the current tick and the
    /// [`SceneRequest`]s posted by scenes.
    pub message_bus: MessageBus,

    /// Clock, deferred calls and timers for the logic thread.
    pub scheduler: Scheduler<Task>,

    /// Input batches received from the platform since the previous tick.
    ///
    /// Consumed by the InputSystem during the update phase.
    pub(crate) frame_input_events: Vec<Vec<InputEvent>>,

    /// Generation of the scene currently committed by the SceneManager.
    scene_generation: u64,
}

impl GlobalContext {
    /// Creates a new context with empty state.
    pub fn new() -> Self {
        Self {
            message_bus: MessageBus::new(),
            scheduler: Scheduler::new(),
            frame_input_events: Vec::new(),
            scene_generation: 0,
        }
    }

    //--- Scene API --------------------------------------------------------

    /// Asks the SceneManager to switch to `id`.
    ///
    /// Fire-and-forget: the request is picked up at the end of the tick and
    /// the swap itself runs on the following one.
    pub fn request_scene_change(&mut self, id: SceneId) {
        self.message_bus.push(SceneRequest(id));
    }

    /// Arms a timer for the active scene.
    ///
    /// The timer is bound to the scene that is active now. If that scene is
    /// released first, the timer is dropped when it comes due.
    pub fn arm_timer(&mut self, delay: Duration, timer: SceneTimer) -> TimerHandle {
        self.scheduler.schedule_after(
            delay,
            Task::SceneTimer {
                generation: self.scene_generation,
                timer,
            },
        )
    }

    /// Input signals of the current tick, oldest first.
    pub fn input_signals(&self) -> &[InputSignal] {
        self.message_bus.read::<InputSignal>()
    }

    /// Logic clock time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    //--- Engine API -------------------------------------------------------

    pub(crate) fn set_scene_generation(&mut self, generation: u64) {
        self.scene_generation = generation;
    }

    #[cfg(test)]
    pub(crate) fn scene_generation(&self) -> u64 {
        self.scene_generation
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
