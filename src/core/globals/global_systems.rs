//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Contains systems that process input, run scheduled work, and manage
// scenes. Systems operate on GlobalContext data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::input::{InputSignal, InputSystem};
use crate::core::scene::{SceneCatalog, SceneFactory, SceneManager};

//=== GlobalSystems =======================================================

/// Container for engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: Key bindings and abstract input signals
/// - `scene_manager`: Owner of the single active scene
pub struct GlobalSystems {
    /// Turns raw platform input into [`InputSignal`]s.
    pub input: InputSystem,

    /// Runs the scene swap protocol and updates the active scene.
    pub scene_manager: SceneManager,
}

impl GlobalSystems {
    /// Creates the systems around a scene catalog and factory.
    pub fn new(catalog: SceneCatalog, factory: SceneFactory) -> Self {
        Self {
            input: InputSystem::new(),
            scene_manager: SceneManager::new(catalog, factory),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates all systems for one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: platform batches become this tick's signals
    /// 2. **Scheduled work**: deferred swaps, then due timers
    /// 3. **Scene update**: the active scene reads signals and posts requests
    /// 4. **Requests**: posted scene requests are queued for the next tick
    pub(crate) fn update(&mut self, context: &mut GlobalContext, dt: Duration) {
        // 1. Replace last tick's signals
        self.input.process_frame(&context.frame_input_events);
        context.frame_input_events.clear();

        context.message_bus.clear::<InputSignal>();
        for signal in self.input.signals() {
            context.message_bus.push(*signal);
        }

        // 2. Run work that came due
        for (handle, task) in context.scheduler.advance(dt) {
            self.scene_manager.dispatch(handle, task, context);
        }

        // 3. Update the active scene
        self.scene_manager.update(context);

        // 4. Queue scene changes
        self.scene_manager.process_requests(context);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
