//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cultivation_shell::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Entry point
pub use crate::engine::{Game, GameBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input system
pub use crate::core::input::{Direction, GameAction, InputSignal, KeyCode, MouseButton};

// Scene system
pub use crate::core::scene::{Scene, SceneCatalog, SceneId, SceneNode, SceneRequest, SceneTimer};

// Battle
pub use crate::core::battle::{BattleConfig, BattleEvent, BattleOutcome, CombatantStats, PlayerAction};

// Messaging
pub use crate::core::message_bus::MessageBus;
pub use crate::core::signal::Signal;
