//=========================================================================
// Battle
//=========================================================================
//
// One-on-one turn-based combat.
//
// Architecture:
//   BattleScene ──perform(action)──▶ BattleEngine ──▶ CombatEntity x2
//        ▲                              │
//        └──── on_timer(EnemyTurn) ─────┤ arm_timer()
//                                       └─▶ Signal<BattleEvent>
//
// The engine is owned by the battle scene and dropped with it.
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod engine;
mod entity;

//=== Public API ==========================================================

pub use config::{BattleConfig, CombatantStats};
pub use engine::{BattleEngine, BattleEvent, BattleOutcome, BattlePhase, BattleState, PlayerAction};
pub use entity::{mitigated_damage, CombatEntity};
