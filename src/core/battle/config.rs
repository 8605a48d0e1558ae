//=========================================================================
// Battle Configuration
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::scene::SceneId;

//=== CombatantStats ======================================================

/// Starting stats of one side of a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatantStats {
    pub name: String,
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl CombatantStats {
    pub fn new(name: impl Into<String>, max_health: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            attack,
            defense,
        }
    }
}

//=== BattleConfig ========================================================

/// Every tunable constant of a battle.
///
/// # Default Values
///
/// - **Player**: "Player", 100 HP, 20 attack, 50 defense
/// - **Enemy**: "Demon", 80 HP, 15 attack, 30 defense
/// - **Defend bonus**: +20 defense until the next enemy attack
/// - **Escape chance**: 0.5
/// - **Delays**: enemy turn 1.0 s, won/lost exit 2.0 s, escape exit 1.5 s
/// - **Exit scene**: [`SceneId::Main`]
/// - **Seed**: none (entropy)
#[derive(Debug, Clone, PartialEq)]
pub struct BattleConfig {
    pub player: CombatantStats,
    pub enemy: CombatantStats,
    pub defend_bonus: u32,
    pub escape_chance: f64,
    pub enemy_turn_delay: Duration,
    pub battle_end_delay: Duration,
    pub escape_exit_delay: Duration,
    pub exit_scene: SceneId,

    /// Seed for the escape roll. Each battle started from this config
    /// replays the same rolls.
    pub seed: Option<u64>,
}

impl BattleConfig {
    pub fn with_player(mut self, stats: CombatantStats) -> Self {
        self.player = stats;
        self
    }

    pub fn with_enemy(mut self, stats: CombatantStats) -> Self {
        self.enemy = stats;
        self
    }

    /// Sets the probability that an escape attempt succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `chance` is outside `[0.0, 1.0]`.
    pub fn with_escape_chance(mut self, chance: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&chance),
            "Escape chance must be within [0, 1], got {}",
            chance
        );
        self.escape_chance = chance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player: CombatantStats::new("Player", 100, 20, 50),
            enemy: CombatantStats::new("Demon", 80, 15, 30),
            defend_bonus: 20,
            escape_chance: 0.5,
            enemy_turn_delay: Duration::from_secs(1),
            battle_end_delay: Duration::from_secs(2),
            escape_exit_delay: Duration::from_millis(1500),
            exit_scene: SceneId::Main,
            seed: None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
