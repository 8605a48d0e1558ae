//=========================================================================
// Battle Scene
//=========================================================================
//
// Presentation shell around a BattleEngine.
//
// Input:
//   left / right  → move the action cursor
//   interact      → perform the selected action
//   menu          → try to escape (any time before the battle ends)
//
// Labels and health bars mirror the engine after every step that can
// change it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::battle::{BattleConfig, BattleEngine, BattleEvent, PlayerAction};
use crate::core::globals::GlobalContext;
use crate::core::input::InputSignal;
use crate::core::scene::{Camera, Scene, SceneNode, SceneTimer};
use crate::core::scheduler::TimerHandle;
use crate::core::signal::Signal;

//=== Constants ===========================================================

const PLAYER_HEALTH_PATH: &str = "PlayerArea/PlayerHealthText";
const ENEMY_HEALTH_PATH: &str = "EnemyArea/EnemyHealthText";
const PLAYER_BAR_PATH: &str = "PlayerArea/PlayerHealthBar";
const ENEMY_BAR_PATH: &str = "EnemyArea/EnemyHealthBar";
const MESSAGE_LOG_PATH: &str = "MessageLog";
const ACTION_PANEL_PATH: &str = "ActionPanel";

/// Narration lines visible in the message log.
const VISIBLE_LOG_LINES: usize = 6;

//=== BattleScene =========================================================

pub struct BattleScene {
    root: SceneNode,
    engine: BattleEngine,
    selected: usize,
}

impl BattleScene {
    /// Creates a fresh encounter. `events` subscribers see every
    /// [`BattleEvent`] of this battle.
    pub fn new(config: &BattleConfig, events: Signal<BattleEvent>) -> Self {
        let actions = PlayerAction::ALL
            .iter()
            .fold(SceneNode::container(ACTION_PANEL_PATH), |panel, action| {
                panel.with_child(SceneNode::button(button_name(*action), action.label()))
            });

        let root = SceneNode::container("BattleScene")
            .with_child(SceneNode::camera("BattleScene#Camera2D", Camera::at(512.0, 300.0)))
            .with_child(
                SceneNode::container("PlayerArea")
                    .with_child(SceneNode::label("PlayerHealthText", ""))
                    .with_child(SceneNode::bar("PlayerHealthBar", 1.0)),
            )
            .with_child(
                SceneNode::container("EnemyArea")
                    .with_child(SceneNode::label("EnemyHealthText", ""))
                    .with_child(SceneNode::bar("EnemyHealthBar", 1.0)),
            )
            .with_child(SceneNode::label(MESSAGE_LOG_PATH, ""))
            .with_child(actions);

        let mut scene = Self {
            root,
            engine: BattleEngine::new(config).with_events(events),
            selected: 0,
        };
        scene.refresh();
        scene
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    pub fn selected(&self) -> PlayerAction {
        PlayerAction::ALL[self.selected]
    }

    /// Text of a label by path, empty if missing.
    pub fn label_text(&self, path: &str) -> &str {
        self.root.get_node(path).and_then(SceneNode::text).unwrap_or_default()
    }

    /// Fill of a health bar by path, 0 if missing.
    pub fn bar_fraction(&self, path: &str) -> f32 {
        self.root.get_node(path).and_then(SceneNode::fraction).unwrap_or_default()
    }

    //--- Presentation -----------------------------------------------------

    fn move_cursor(&mut self, right: bool) {
        let count = PlayerAction::ALL.len();
        self.selected = if right {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
    }

    fn refresh(&mut self) {
        let player = self.engine.player().health_text();
        let enemy = self.engine.enemy().health_text();
        let narration = self.engine.narration();
        let log = narration[narration.len().saturating_sub(VISIBLE_LOG_LINES)..].join("\n");

        self.set_label(PLAYER_HEALTH_PATH, player);
        self.set_label(ENEMY_HEALTH_PATH, enemy);
        self.set_label(MESSAGE_LOG_PATH, log);

        let player_fill = self.engine.player().health_fraction();
        let enemy_fill = self.engine.enemy().health_fraction();
        self.set_bar(PLAYER_BAR_PATH, player_fill);
        self.set_bar(ENEMY_BAR_PATH, enemy_fill);

        let selected = self.selected();
        for action in PlayerAction::ALL {
            let path = format!("{}/{}", ACTION_PANEL_PATH, button_name(action));
            let text = if action == selected {
                format!("[{}]", action.label())
            } else {
                action.label().to_string()
            };
            self.set_label(&path, text);
        }
    }

    fn set_label(&mut self, path: &str, text: String) {
        if let Some(node) = self.root.get_node_mut(path) {
            node.set_text(text);
        }
    }

    fn set_bar(&mut self, path: &str, fraction: f32) {
        if let Some(node) = self.root.get_node_mut(path) {
            node.set_fraction(fraction);
        }
    }
}

fn button_name(action: PlayerAction) -> &'static str {
    match action {
        PlayerAction::Attack => "AttackButton",
        PlayerAction::Skill => "SkillButton",
        PlayerAction::Defend => "DefendButton",
        PlayerAction::Escape => "EscapeButton",
    }
}

impl Scene for BattleScene {
    fn root(&self) -> &SceneNode {
        &self.root
    }

    fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    fn on_enter(&mut self, _context: &mut GlobalContext) {
        self.engine.begin();
        self.refresh();
    }

    fn update(&mut self, context: &mut GlobalContext) {
        let signals = context.input_signals().to_vec();
        if signals.is_empty() {
            return;
        }

        for signal in signals {
            match signal {
                InputSignal::DirectionChanged(direction) if direction.points_left() => self.move_cursor(false),
                InputSignal::DirectionChanged(direction) if direction.points_right() => self.move_cursor(true),
                InputSignal::DirectionChanged(_) => {}
                InputSignal::InteractPressed => self.engine.perform(self.selected(), context),
                InputSignal::MenuPressed => self.engine.escape(context),
            }
        }
        self.refresh();
    }

    fn on_timer(&mut self, handle: TimerHandle, timer: SceneTimer, context: &mut GlobalContext) {
        self.engine.on_timer(handle, timer, context);
        self.refresh();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
