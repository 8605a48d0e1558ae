//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Central coordinator for all game systems running on the logic
// (non-platform) thread.
//
// Architecture:
//   Platform ──PlatformEvent──▶ EventCollector ──batches──▶ GlobalSystems
//                                                              │
//                                   GlobalContext ◀────────────┘
//
// Each tick:
//  1. Collects platform input (or exits on WindowClosed / disconnect)
//  2. Updates GlobalSystems with a fixed timestep
//  3. Sleeps to maintain fixed pacing
//
//=========================================================================

//=== Module Declarations =================================================

pub mod battle;
pub mod globals;
pub mod input;
pub mod message_bus;
pub mod platform_bridge;
pub mod scene;
pub mod scheduler;
pub mod signal;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Dependencies ===============================================

use input::InputEvent;
use platform_bridge::{EventCollector, FramePoll, PlatformEvent};

//=== CoreSystemsOrchestrator =============================================

/// Owns the game systems and their shared context until the logic thread
/// takes them over.
pub(crate) struct CoreSystemsOrchestrator {
    systems: GlobalSystems,
    context: GlobalContext,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(systems: GlobalSystems) -> Self {
        Self {
            systems,
            context: GlobalContext::new(),
        }
    }

    /// Gives mutable access to the systems before the logic thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems),
    {
        init_fn(&mut self.systems);
    }

    //--- Tick -------------------------------------------------------------

    /// Requests the initial scene. Runs once before the first tick.
    pub(crate) fn start(&mut self) {
        self.systems.scene_manager.start(&mut self.context);
    }

    /// Runs one logic tick with the given input batches.
    pub(crate) fn tick(&mut self, batches: Vec<Vec<InputEvent>>, dt: Duration) {
        self.context.frame_input_events.extend(batches);
        self.systems.update(&mut self.context, dt);
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn systems(&self) -> &GlobalSystems {
        &self.systems
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> &GlobalContext {
        &self.context
    }

    //--- Logic Thread -----------------------------------------------------

    /// Spawns the logic thread ticking at `tps`.
    ///
    /// The logic clock advances by exactly one tick period per tick, so
    /// timer behavior does not depend on scheduling jitter.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let collector = EventCollector::new(receiver);
            self.start();

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                let batches = match collector.poll() {
                    FramePoll::Inputs(batches) => batches,
                    FramePoll::Exit(reason) => {
                        info!(
                            "Core thread exiting ({:?}) after {} ticks",
                            reason,
                            self.context.scheduler.tick_count()
                        );
                        break;
                    }
                };

                //--- Step 2: Update systems --------------------------------
                self.tick(batches, frame_duration);

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crate::core::scene::{SceneCatalog, SceneId};
    use crate::scenes;
    use crossbeam_channel::unbounded;

    fn orchestrator() -> CoreSystemsOrchestrator {
        let factory = scenes::standard_factory(&Default::default(), Default::default());
        CoreSystemsOrchestrator::new(GlobalSystems::new(SceneCatalog::standard(), factory))
    }

    #[test]
    fn init_systems_runs_before_start() {
        let mut core = orchestrator();
        let mut called = false;

        core.init_systems(|systems| {
            called = true;
            assert!(!systems.scene_manager.has_active());
        });

        assert!(called);
    }

    #[test]
    fn first_tick_loads_the_home_scene() {
        let mut core = orchestrator();
        core.start();
        core.tick(Vec::new(), Duration::from_millis(16));

        assert_eq!(core.systems().scene_manager.active_id(), Some(SceneId::Home));
        assert_eq!(core.context().scheduler.tick_count(), 1);
    }

    #[test]
    fn tick_feeds_input_to_systems() {
        let mut core = orchestrator();
        core.start();
        core.tick(vec![vec![InputEvent::KeyDown(KeyCode::KeyW)]], Duration::from_millis(16));

        assert!(core.systems().input.direction().points_up());
    }

    #[test]
    fn core_thread_exits_on_window_closed() {
        let (tx, rx) = unbounded();
        let handle = orchestrator().spawn_core_thread(rx, 240.0);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyE)]))
            .unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(handle.join().is_ok());
    }

    #[test]
    fn core_thread_exits_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let handle = orchestrator().spawn_core_thread(rx, 240.0);

        drop(tx);

        assert!(handle.join().is_ok());
    }
}
