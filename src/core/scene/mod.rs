//=========================================================================
// Scene System
//=========================================================================
//
// Exclusive full-screen scenes and the protocol that swaps them.
//
// Architecture:
//   SceneManager
//     ├─ catalog: SceneCatalog      (SceneId → locator)
//     ├─ factory: SceneFactory      (locator → Box<dyn Scene>)
//     └─ active:  Option<ActiveScene>
//
// Flow:
//   request_change() → Task::SwapScene (deferred)
//     → execute_swap() → release → materialize → anchor → commit → signal
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::scheduler::TimerHandle;

//=== Module Declarations =================================================

mod catalog;
mod error;
mod factory;
mod node;
mod scene_manager;

//=== Public API ==========================================================

pub use catalog::SceneCatalog;
pub(crate) use catalog::{BATTLE_LOCATOR, HOME_LOCATOR, TOWN_LOCATOR};
pub use error::SceneError;
pub use factory::{SceneFactory, SceneResult};
pub use node::{Anchor, Camera, NodeKind, SceneNode};
pub use scene_manager::{SceneLoadFailed, SceneManager};

//=== SceneId =============================================================

/// Identifies a scene in the catalog.
///
/// `Main` is an alias of `Home`: both map to the same locator, but they
/// remain distinct tags for the "already current" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneId {
    #[default]
    Home,
    Town,
    Battle,
    Main,
}

impl SceneId {
    /// Every tag, in declaration order.
    pub const ALL: [SceneId; 4] = [SceneId::Home, SceneId::Town, SceneId::Battle, SceneId::Main];
}

//=== Messages ============================================================

/// Scene change request posted on the message bus.
///
/// Consumed by the SceneManager at the end of each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequest(pub SceneId);

/// Timers a scene may arm through [`GlobalContext::arm_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneTimer {
    /// Battle: the enemy acts after the player's turn.
    EnemyTurn,

    /// Battle: leave the battle scene after it has ended.
    LeaveBattle,

    /// Home: hide the transient status message.
    ClearMessage,
}

//=== Scene Trait =========================================================

/// Behavior of one full-screen scene.
///
/// A scene owns a [`SceneNode`] tree the manager searches for the
/// presentation anchor. Only `root`, `root_mut` and `update` are required.
pub trait Scene: Send {
    /// Root of the scene's node tree.
    fn root(&self) -> &SceneNode;

    fn root_mut(&mut self) -> &mut SceneNode;

    /// Called once after the scene is attached and anchored.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called right before the scene is released.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while the scene is active.
    fn update(&mut self, context: &mut GlobalContext);

    /// Called when a timer this scene armed comes due.
    fn on_timer(&mut self, _handle: TimerHandle, _timer: SceneTimer, _context: &mut GlobalContext) {}
}
