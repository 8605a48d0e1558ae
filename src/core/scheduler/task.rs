//=========================================================================
// Scheduled Tasks
//=========================================================================
//
// Continuations the game hands to the scheduler.
//
// Tasks are plain data. GlobalSystems dispatches each due task to its
// owner, which checks liveness before acting on it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::{SceneId, SceneTimer};

//=== Task ================================================================

/// A unit of deferred work owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Replace the active scene (SceneManager only).
    SwapScene(SceneId),

    /// Timer armed by a scene.
    ///
    /// `generation` identifies the scene instance that armed it; the timer
    /// is dropped if that instance is no longer active when it fires.
    SceneTimer { generation: u64, timer: SceneTimer },
}
