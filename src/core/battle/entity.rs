//=========================================================================
// Combat Entity
//=========================================================================

//=== Internal Dependencies ===============================================

use super::config::CombatantStats;

//=== Damage ==============================================================

/// Damage left after defense: `max(1, raw - defense / 10)`.
pub fn mitigated_damage(raw: u32, defense: u32) -> u32 {
    raw.saturating_sub(defense / 10).max(1)
}

//=== CombatEntity ========================================================

/// One side of a battle. Health stays within `[0, max_health]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatEntity {
    name: String,
    max_health: u32,
    current_health: u32,
    attack: u32,
    base_defense: u32,
    defense_bonus: u32,
}

impl CombatEntity {
    /// Creates an entity at full health.
    pub fn new(stats: &CombatantStats) -> Self {
        Self {
            name: stats.name.clone(),
            max_health: stats.max_health,
            current_health: stats.max_health,
            attack: stats.attack,
            base_defense: stats.defense,
            defense_bonus: 0,
        }
    }

    //--- Combat -----------------------------------------------------------

    /// Applies an attack of `raw` strength and returns the damage dealt
    /// after defense.
    pub fn take_damage(&mut self, raw: u32) -> u32 {
        let damage = mitigated_damage(raw, self.defense());
        self.current_health = self.current_health.saturating_sub(damage);
        damage
    }

    /// Sets the temporary defense bonus. Bonuses replace each other.
    pub fn set_defense_bonus(&mut self, bonus: u32) {
        self.defense_bonus = bonus;
    }

    /// Removes the temporary defense bonus. Returns whether one was set.
    pub fn clear_defense_bonus(&mut self) -> bool {
        std::mem::take(&mut self.defense_bonus) > 0
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    /// Base defense plus any temporary bonus, saturating at `u32::MAX`.
    pub fn defense(&self) -> u32 {
        self.base_defense.saturating_add(self.defense_bonus)
    }

    /// Remaining health as a fraction of max health, in `0.0..=1.0`.
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        (f64::from(self.current_health) / f64::from(self.max_health)) as f32
    }

    /// "Name: current/max", as shown on health labels.
    pub fn health_text(&self) -> String {
        format!("{}: {}/{}", self.name, self.current_health, self.max_health)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
