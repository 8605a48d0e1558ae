//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the single active scene and runs the swap protocol.
//
// States:
//   Idle ──request_change()──▶ PendingSwap ──next tick──▶ Idle
//
// execute_swap():
//   1. release the active scene (on_exit, drop)
//   2. resolve the tag through the catalog
//   3. materialize a fresh instance through the factory
//   4. on failure: log, signal scene_failed, leave the slot empty
//   5. resolve the presentation anchor
//   6. commit: new generation, on_enter, current_type
//   7. signal scene_changed
//
// Every scene commit gets a new generation. Timers are tagged with the
// generation that armed them and dropped if it is no longer active.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::{Anchor, Scene, SceneCatalog, SceneError, SceneFactory, SceneId, SceneRequest, SceneTimer};
use crate::core::globals::GlobalContext;
use crate::core::scheduler::{Task, TimerHandle};
use crate::core::signal::Signal;

//=== SceneLoadFailed =====================================================

/// Payload of [`SceneManager::scene_failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneLoadFailed {
    pub id: SceneId,
    pub error: SceneError,
}

//=== ActiveScene =========================================================

struct ActiveScene {
    id: SceneId,
    scene: Box<dyn Scene>,
    anchor: Anchor,
    generation: u64,
}

//=== SceneManager ========================================================

/// Persistent owner of the active scene.
///
/// Scene changes are never applied immediately: a request queues a
/// deferred swap that runs on the next tick, outside of any scene's
/// `update`.
pub struct SceneManager {
    catalog: SceneCatalog,
    factory: SceneFactory,
    active: Option<ActiveScene>,
    current_type: SceneId,
    generation: u64,

    /// Emitted once per committed swap.
    pub scene_changed: Signal<SceneId>,

    /// Emitted when a swap aborts. No scene is active afterwards.
    pub scene_failed: Signal<SceneLoadFailed>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new(catalog: SceneCatalog, factory: SceneFactory) -> Self {
        Self {
            catalog,
            factory,
            active: None,
            current_type: SceneId::default(),
            generation: 0,
            scene_changed: Signal::new(),
            scene_failed: Signal::new(),
        }
    }

    /// Requests the initial scene if nothing is active yet.
    pub fn start(&mut self, context: &mut GlobalContext) {
        if self.active.is_none() {
            debug!("Starting scene manager with initial scene {:?}", self.current_type);
            self.request_change(self.current_type, context);
        }
    }

    //--- Requests ---------------------------------------------------------

    /// Queues a swap to `id` for the next tick.
    ///
    /// Ignored when `id` is already the active scene. Requests are not
    /// collapsed: each accepted one runs its own swap.
    pub fn request_change(&mut self, id: SceneId, context: &mut GlobalContext) {
        if self.active.is_some() && id == self.current_type {
            debug!("Scene {:?} is already active, ignoring request", id);
            return;
        }

        let handle = context.scheduler.defer(Task::SwapScene(id));
        debug!("Scene change to {:?} queued as {:?}", id, handle);
    }

    /// Turns every [`SceneRequest`] posted this tick into a queued swap.
    pub fn process_requests(&mut self, context: &mut GlobalContext) {
        for SceneRequest(id) in context.message_bus.drain::<SceneRequest>() {
            self.request_change(id, context);
        }
    }

    //--- Scheduled Work ---------------------------------------------------

    /// Runs one task handed back by the scheduler.
    pub fn dispatch(&mut self, handle: TimerHandle, task: Task, context: &mut GlobalContext) {
        match task {
            Task::SwapScene(id) => self.execute_swap(id, context),
            Task::SceneTimer { generation, timer } => {
                self.deliver_timer(generation, handle, timer, context)
            }
        }
    }

    /// Replaces the active scene with a fresh instance of `id`.
    pub fn execute_swap(&mut self, id: SceneId, context: &mut GlobalContext) {
        debug!("Swapping to scene {:?}", id);
        self.release_active(context);

        let mut scene = match self.materialize(id) {
            Ok(scene) => scene,
            Err(err) => {
                error!("Scene change to {:?} failed: {}", id, err);
                self.scene_failed.emit(&SceneLoadFailed { id, error: err });
                return;
            }
        };

        let anchor = scene.root_mut().resolve_anchor();
        debug!("Scene {:?} anchored at {} (synthesized: {})", id, anchor.path, anchor.synthesized);

        self.generation += 1;
        context.set_scene_generation(self.generation);
        scene.on_enter(context);
        scene.root().log_structure();

        self.active = Some(ActiveScene {
            id,
            scene,
            anchor,
            generation: self.generation,
        });
        self.current_type = id;

        info!("Scene changed to {:?}", id);
        self.scene_changed.emit(&id);
    }

    /// Forwards a due timer to the scene that armed it, if still active.
    pub fn deliver_timer(
        &mut self,
        generation: u64,
        handle: TimerHandle,
        timer: SceneTimer,
        context: &mut GlobalContext,
    ) {
        match &mut self.active {
            Some(active) if active.generation == generation => {
                active.scene.on_timer(handle, timer, context);
            }
            _ => debug!(
                "Dropping {:?} timer {:?} from released scene generation {}",
                timer, handle, generation
            ),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the active scene, if any.
    pub fn update(&mut self, context: &mut GlobalContext) {
        if let Some(active) = &mut self.active {
            active.scene.update(context);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }

    /// Tag of the scene that is actually alive, if any.
    pub fn active_id(&self) -> Option<SceneId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Tag of the last committed scene. Kept after a failed swap.
    pub fn current_type(&self) -> SceneId {
        self.current_type
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.active.as_ref().map(|a| &a.anchor)
    }

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.active.as_ref().map(|a| a.scene.as_ref())
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    //--- Internal Helpers -------------------------------------------------

    fn release_active(&mut self, context: &mut GlobalContext) {
        if let Some(mut old) = self.active.take() {
            debug!("Releasing scene {:?}", old.id);
            old.scene.on_exit(context);
        }
    }

    fn materialize(&self, id: SceneId) -> Result<Box<dyn Scene>, SceneError> {
        let locator = self.catalog.locate(id).ok_or(SceneError::Unmapped(id))?;
        debug!("Scene {:?} resolved to {}", id, locator);
        self.factory.instantiate(locator)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
