//=========================================================================
// Battle Engine
//=========================================================================
//
// Turn-based state machine for a one-on-one encounter.
//
// Phases:
//   PlayerTurn ─action─▶ ResolvingPlayerAction ─▶ EnemyTurnPending
//        ▲                      │                        │ 1.0 s timer
//        │                      ▼                        ▼
//        └──────────────── EnemyTurn ◀───────────────────┘
//                               │
//   any actor at 0 HP / escape ─┴─▶ Ended(Won | Lost | Escaped)
//
// Ended arms an exit timer, after which the engine asks for the exit
// scene. Timers are matched against `pending_timer`; anything else that
// fires is stale and ignored.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

//=== Internal Dependencies ===============================================

use super::config::BattleConfig;
use super::entity::CombatEntity;
use crate::core::globals::GlobalContext;
use crate::core::scene::SceneTimer;
use crate::core::scheduler::TimerHandle;
use crate::core::signal::Signal;

//=== Actions & Phases ====================================================

/// Player action requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    Skill,
    Defend,
    Escape,
}

impl PlayerAction {
    /// Actions in menu order.
    pub const ALL: [PlayerAction; 4] = [
        PlayerAction::Attack,
        PlayerAction::Skill,
        PlayerAction::Defend,
        PlayerAction::Escape,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Skill => "Skill",
            Self::Defend => "Defend",
            Self::Escape => "Escape",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    ResolvingPlayerAction,
    EnemyTurnPending,
    EnemyTurn,
    Ended(BattleOutcome),
}

//=== BattleEvent =========================================================

/// Notifications emitted while a battle runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    /// A line appended to the narration log.
    Narration(String),

    /// Current health of both sides after a hit.
    HealthChanged { player: u32, enemy: u32 },

    TurnChanged(BattlePhase),

    /// Emitted exactly once per battle.
    Ended(BattleOutcome),
}

//=== BattleState =========================================================

/// Mutable turn state.
///
/// While `active` is false no action is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleState {
    pub active: bool,
    pub phase: BattlePhase,

    /// The one timer this battle is waiting for (enemy turn or exit).
    pub pending_timer: Option<TimerHandle>,

    pub defend_bonus_active: bool,
}

//=== BattleEngine ========================================================

/// Owns both combatants and drives the turn order.
pub struct BattleEngine {
    config: BattleConfig,
    player: CombatEntity,
    enemy: CombatEntity,
    state: BattleState,
    rng: ChaCha8Rng,
    narration: Vec<String>,
    events: Signal<BattleEvent>,
}

impl BattleEngine {
    //--- Construction -----------------------------------------------------

    /// Creates a battle in the player's turn.
    pub fn new(config: &BattleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            config: config.clone(),
            player: CombatEntity::new(&config.player),
            enemy: CombatEntity::new(&config.enemy),
            state: BattleState {
                active: true,
                phase: BattlePhase::PlayerTurn,
                pending_timer: None,
                defend_bonus_active: false,
            },
            rng,
            narration: Vec::new(),
            events: Signal::new(),
        }
    }

    /// Replaces the event signal. Subscribers should be connected before
    /// [`BattleEngine::begin`].
    pub fn with_events(mut self, events: Signal<BattleEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn events_mut(&mut self) -> &mut Signal<BattleEvent> {
        &mut self.events
    }

    /// Posts the opening narration.
    pub fn begin(&mut self) {
        self.narrate(format!("The battle begins! A {} appears!", self.enemy.name()));
        self.narrate("Your turn!".to_string());
        self.emit_health();
    }

    //--- Player Actions ---------------------------------------------------

    /// Dispatches a player action. Requests in an invalid state are ignored.
    pub fn perform(&mut self, action: PlayerAction, context: &mut GlobalContext) {
        match action {
            PlayerAction::Attack => self.attack(context),
            PlayerAction::Skill => self.skill(context),
            PlayerAction::Defend => self.defend(context),
            PlayerAction::Escape => self.escape(context),
        }
    }

    pub fn attack(&mut self, context: &mut GlobalContext) {
        if !self.begin_player_action(PlayerAction::Attack) {
            return;
        }

        let dealt = self.enemy.take_damage(self.player.attack());
        self.narrate(format!("You hit the {} for {} damage!", self.enemy.name(), dealt));
        self.after_player_hit(context);
    }

    /// Attack at 1.5x strength, rounded down.
    pub fn skill(&mut self, context: &mut GlobalContext) {
        if !self.begin_player_action(PlayerAction::Skill) {
            return;
        }

        let raw = self.player.attack().saturating_mul(3) / 2;
        let dealt = self.enemy.take_damage(raw);
        self.narrate(format!(
            "You unleash a skill! The {} takes {} damage!",
            self.enemy.name(),
            dealt
        ));
        self.after_player_hit(context);
    }

    /// Raises defense until the next enemy attack.
    ///
    /// Every enemy attack clears the bonus before the player can act again,
    /// so a bonus is never active here.
    pub fn defend(&mut self, context: &mut GlobalContext) {
        if !self.begin_player_action(PlayerAction::Defend) {
            return;
        }

        self.player.set_defense_bonus(self.config.defend_bonus);
        self.state.defend_bonus_active = true;
        self.narrate("You take a defensive stance, raising your defense!".to_string());
        self.schedule_enemy_turn(context);
    }

    /// Tries to flee. Accepted at any point before the battle ends.
    ///
    /// A failed attempt gives the enemy a free attack right away, which
    /// replaces any enemy turn that was already pending.
    pub fn escape(&mut self, context: &mut GlobalContext) {
        if !self.state.active {
            debug!("Ignoring escape: battle is over");
            return;
        }

        if self.roll_escape() {
            self.narrate("You escaped from the battle!".to_string());
            self.end(BattleOutcome::Escaped, context);
        } else {
            self.narrate(format!(
                "Escape failed! The {} seizes the chance to attack!",
                self.enemy.name()
            ));
            self.state.pending_timer = None;
            self.enemy_attack(context);
        }
    }

    //--- Timers -----------------------------------------------------------

    /// Handles a timer armed by this battle.
    pub fn on_timer(&mut self, handle: TimerHandle, timer: SceneTimer, context: &mut GlobalContext) {
        if self.state.pending_timer != Some(handle) {
            debug!("Ignoring stale battle timer {:?} ({:?})", handle, timer);
            return;
        }
        self.state.pending_timer = None;

        match (timer, self.state.phase) {
            (SceneTimer::EnemyTurn, BattlePhase::EnemyTurnPending) => self.enemy_turn(context),
            (SceneTimer::LeaveBattle, BattlePhase::Ended(outcome)) => {
                info!("Leaving battle ({:?}) for {:?}", outcome, self.config.exit_scene);
                context.request_scene_change(self.config.exit_scene);
            }
            (timer, phase) => debug!("Timer {:?} does not apply in phase {:?}", timer, phase),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn player(&self) -> &CombatEntity {
        &self.player
    }

    pub fn enemy(&self) -> &CombatEntity {
        &self.enemy
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Every narration line so far, oldest first.
    pub fn narration(&self) -> &[String] {
        &self.narration
    }

    //--- Turn Flow --------------------------------------------------------

    fn begin_player_action(&mut self, action: PlayerAction) -> bool {
        if !self.state.active || self.state.phase != BattlePhase::PlayerTurn {
            debug!("Ignoring {:?} in phase {:?}", action, self.state.phase);
            return false;
        }
        self.set_phase(BattlePhase::ResolvingPlayerAction);
        true
    }

    fn after_player_hit(&mut self, context: &mut GlobalContext) {
        self.emit_health();
        if self.enemy.is_alive() {
            self.schedule_enemy_turn(context);
        } else {
            self.narrate(format!("You defeated the {}! Victory!", self.enemy.name()));
            self.end(BattleOutcome::Won, context);
        }
    }

    fn schedule_enemy_turn(&mut self, context: &mut GlobalContext) {
        self.set_phase(BattlePhase::EnemyTurnPending);
        let handle = context.arm_timer(self.config.enemy_turn_delay, SceneTimer::EnemyTurn);
        self.state.pending_timer = Some(handle);
    }

    fn enemy_turn(&mut self, context: &mut GlobalContext) {
        self.set_phase(BattlePhase::EnemyTurn);
        self.narrate(format!("The {}'s turn!", self.enemy.name()));
        self.enemy_attack(context);
    }

    fn enemy_attack(&mut self, context: &mut GlobalContext) {
        let dealt = self.player.take_damage(self.enemy.attack());
        self.narrate(format!("The {} hits you for {} damage!", self.enemy.name(), dealt));

        if self.state.defend_bonus_active {
            self.player.clear_defense_bonus();
            self.state.defend_bonus_active = false;
            self.narrate("Your defensive stance ends.".to_string());
        }
        self.emit_health();

        if self.player.is_alive() {
            self.set_phase(BattlePhase::PlayerTurn);
            self.narrate("Your turn!".to_string());
        } else {
            self.narrate("You have been defeated!".to_string());
            self.end(BattleOutcome::Lost, context);
        }
    }

    fn end(&mut self, outcome: BattleOutcome, context: &mut GlobalContext) {
        self.state.active = false;
        self.set_phase(BattlePhase::Ended(outcome));

        let delay = match outcome {
            BattleOutcome::Escaped => self.config.escape_exit_delay,
            BattleOutcome::Won | BattleOutcome::Lost => self.config.battle_end_delay,
        };
        self.state.pending_timer = Some(context.arm_timer(delay, SceneTimer::LeaveBattle));

        info!("Battle ended: {:?}", outcome);
        self.events.emit(&BattleEvent::Ended(outcome));
    }

    fn roll_escape(&mut self) -> bool {
        self.rng.gen_bool(self.config.escape_chance)
    }

    //--- Notifications ----------------------------------------------------

    fn set_phase(&mut self, phase: BattlePhase) {
        self.state.phase = phase;
        self.events.emit(&BattleEvent::TurnChanged(phase));
    }

    fn narrate(&mut self, line: String) {
        info!("{}", line);
        self.events.emit(&BattleEvent::Narration(line.clone()));
        self.narration.push(line);
    }

    fn emit_health(&self) {
        self.events.emit(&BattleEvent::HealthChanged {
            player: self.player.current_health(),
            enemy: self.enemy.current_health(),
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::battle::config::CombatantStats;
    use crate::core::scene::{SceneId, SceneRequest};
    use crate::core::scheduler::Task;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    //--- Helpers ----------------------------------------------------------

    fn config() -> BattleConfig {
        BattleConfig::default().with_seed(7)
    }

    /// Advances the clock and feeds due timers to the engine.
    fn advance(engine: &mut BattleEngine, context: &mut GlobalContext, millis: u64) {
        for (handle, task) in context.scheduler.advance(Duration::from_millis(millis)) {
            if let Task::SceneTimer { timer, .. } = task {
                engine.on_timer(handle, timer, context);
            }
        }
    }

    fn requests(context: &GlobalContext) -> Vec<SceneRequest> {
        context.message_bus.read::<SceneRequest>().to_vec()
    }

    //--- Player Actions ---------------------------------------------------

    #[test]
    fn attack_damages_enemy_and_schedules_enemy_turn() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());

        engine.attack(&mut context);

        assert_eq!(engine.enemy().current_health(), 63);
        assert_eq!(engine.phase(), BattlePhase::EnemyTurnPending);
        assert!(engine.state().pending_timer.is_some());
        assert_eq!(context.scheduler.pending_timers(), 1);
    }

    #[test]
    fn skill_hits_for_one_and_a_half_attack() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());

        engine.skill(&mut context);

        // 20 * 1.5 = 30, minus 30 / 10
        assert_eq!(engine.enemy().current_health(), 80 - 27);
    }

    #[test]
    fn skill_with_extreme_attack_saturates() {
        let mut context = GlobalContext::new();
        let player = CombatantStats::new("Player", 100, u32::MAX / 2 + 1, 50);
        let mut engine = BattleEngine::new(&config().with_player(player));

        engine.skill(&mut context);

        assert_eq!(engine.enemy().current_health(), 0);
        assert_eq!(engine.outcome(), Some(BattleOutcome::Won));
    }

    #[test]
    fn enemy_acts_once_the_delay_elapses() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());
        engine.attack(&mut context);

        advance(&mut engine, &mut context, 900);
        assert_eq!(engine.player().current_health(), 100);

        advance(&mut engine, &mut context, 100);
        assert_eq!(engine.player().current_health(), 90);
        assert_eq!(engine.phase(), BattlePhase::PlayerTurn);
        assert_eq!(engine.state().pending_timer, None);
    }

    #[test]
    fn actions_outside_the_player_turn_are_ignored() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());
        engine.attack(&mut context);

        engine.attack(&mut context);
        engine.skill(&mut context);
        engine.defend(&mut context);

        assert_eq!(engine.enemy().current_health(), 63);
        assert_eq!(context.scheduler.pending_timers(), 1);
    }

    #[test]
    fn defend_bonus_lasts_exactly_one_enemy_attack() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());

        engine.defend(&mut context);
        assert_eq!(engine.player().defense(), 70);

        advance(&mut engine, &mut context, 1000);
        // 15 - 70 / 10
        assert_eq!(engine.player().current_health(), 92);
        assert_eq!(engine.player().defense(), 50);
        assert!(!engine.state().defend_bonus_active);

        engine.attack(&mut context);
        advance(&mut engine, &mut context, 1000);
        assert_eq!(engine.player().current_health(), 82);
        let stance_ended = engine
            .narration()
            .iter()
            .filter(|line| line.contains("stance ends"))
            .count();
        assert_eq!(stance_ended, 1);
    }

    //--- Escape -----------------------------------------------------------

    #[test]
    fn successful_escape_ends_battle_and_leaves_after_delay() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config().with_escape_chance(1.0));

        engine.escape(&mut context);
        assert_eq!(engine.outcome(), Some(BattleOutcome::Escaped));
        assert!(!engine.is_active());

        advance(&mut engine, &mut context, 1400);
        assert!(requests(&context).is_empty());

        advance(&mut engine, &mut context, 100);
        assert_eq!(requests(&context), vec![SceneRequest(SceneId::Main)]);
    }

    #[test]
    fn failed_escape_triggers_immediate_enemy_attack() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config().with_escape_chance(0.0));

        engine.escape(&mut context);

        assert_eq!(engine.player().current_health(), 90);
        assert_eq!(engine.phase(), BattlePhase::PlayerTurn);
        assert!(engine.is_active());
        assert_eq!(context.scheduler.pending_timers(), 0);
    }

    #[test]
    fn failed_escape_during_pending_enemy_turn_replaces_it() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config().with_escape_chance(0.0));
        engine.attack(&mut context);

        engine.escape(&mut context);
        assert_eq!(engine.player().current_health(), 90);

        // The earlier enemy turn fires but is stale.
        advance(&mut engine, &mut context, 1000);
        assert_eq!(engine.player().current_health(), 90);
        assert_eq!(engine.phase(), BattlePhase::PlayerTurn);
    }

    #[test]
    fn seeded_battles_roll_identically() {
        let rolls = |seed| {
            let mut engine = BattleEngine::new(&BattleConfig::default().with_seed(seed));
            (0..16).map(|_| engine.roll_escape()).collect::<Vec<_>>()
        };

        assert_eq!(rolls(99), rolls(99));
    }

    #[test]
    fn escape_rate_converges_to_configured_chance() {
        let mut engine = BattleEngine::new(&config());
        let trials = 10_000;
        let escaped = (0..trials).filter(|_| engine.roll_escape()).count();

        let rate = escaped as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.02, "escape rate {}", rate);
    }

    //--- Termination ------------------------------------------------------

    #[test]
    fn defeating_the_enemy_wins_once() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config().with_enemy(CombatantStats::new("Slime", 10, 1, 0)));

        let ended = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ended);
        engine.events_mut().connect(move |event| {
            if let BattleEvent::Ended(outcome) = event {
                sink.lock().unwrap().push(*outcome);
            }
        });

        engine.attack(&mut context);
        engine.attack(&mut context);
        engine.escape(&mut context);

        assert_eq!(engine.outcome(), Some(BattleOutcome::Won));
        assert_eq!(engine.enemy().current_health(), 0);
        assert_eq!(*ended.lock().unwrap(), vec![BattleOutcome::Won]);

        advance(&mut engine, &mut context, 2000);
        assert_eq!(requests(&context), vec![SceneRequest(SceneId::Main)]);
    }

    #[test]
    fn five_attacks_defeat_the_default_enemy() {
        let mut context = GlobalContext::new();
        let mut engine = BattleEngine::new(&config());
        let mut enemy_health = Vec::new();

        for _ in 0..5 {
            engine.attack(&mut context);
            enemy_health.push(engine.enemy().current_health());
            advance(&mut engine, &mut context, 1000);
        }

        assert_eq!(enemy_health, vec![63, 46, 29, 12, 0]);
        assert_eq!(engine.outcome(), Some(BattleOutcome::Won));
        assert_eq!(engine.player().current_health(), 60);
    }

    #[test]
    fn losing_all_health_loses_the_battle() {
        let mut context = GlobalContext::new();
        let config = config()
            .with_player(CombatantStats::new("Player", 5, 1, 0))
            .with_enemy(CombatantStats::new("Ogre", 500, 50, 0));
        let mut engine = BattleEngine::new(&config);

        engine.attack(&mut context);
        advance(&mut engine, &mut context, 1000);

        assert_eq!(engine.outcome(), Some(BattleOutcome::Lost));
        assert_eq!(engine.player().current_health(), 0);

        advance(&mut engine, &mut context, 1900);
        assert!(requests(&context).is_empty());
        advance(&mut engine, &mut context, 100);
        assert_eq!(requests(&context).len(), 1);
    }

    #[test]
    fn narration_and_events_stay_in_step() {
        let mut context = GlobalContext::new();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let mut events = Signal::new();
        events.connect(move |event: &BattleEvent| {
            if let BattleEvent::Narration(line) = event {
                sink.lock().unwrap().push(line.clone());
            }
        });

        let mut engine = BattleEngine::new(&config()).with_events(events);
        engine.begin();
        engine.attack(&mut context);

        assert_eq!(engine.narration().len(), 3);
        assert_eq!(*lines.lock().unwrap(), engine.narration());
        assert!(engine.narration()[2].contains("17 damage"));
    }
}
