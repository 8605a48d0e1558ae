//=========================================================================
// Dojo Scene
//=========================================================================
//
// Home base. A vertical menu; "Enter City" leaves for the town, the other
// entries flash a status message for a few seconds.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::input::InputSignal;
use crate::core::scene::{Camera, Scene, SceneId, SceneNode, SceneTimer};
use crate::core::scheduler::TimerHandle;

//=== Constants ===========================================================

const MENU_PATH: &str = "MenuContainer";
const MESSAGE_PATH: &str = "MessageLabel";

/// How long a status message stays up (fade in, hold, fade out).
const MESSAGE_DURATION: Duration = Duration::from_millis(2500);

//=== DojoMenuItem ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DojoMenuItem {
    EnterCity,
    Practice,
    Inventory,
    Settings,
}

impl DojoMenuItem {
    pub const ALL: [DojoMenuItem; 4] = [
        DojoMenuItem::EnterCity,
        DojoMenuItem::Practice,
        DojoMenuItem::Inventory,
        DojoMenuItem::Settings,
    ];

    fn node_name(self) -> &'static str {
        match self {
            Self::EnterCity => "EnterCityButton",
            Self::Practice => "PracticeButton",
            Self::Inventory => "InventoryButton",
            Self::Settings => "SettingsButton",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::EnterCity => "Enter City",
            Self::Practice => "Practice",
            Self::Inventory => "Inventory",
            Self::Settings => "Settings",
        }
    }
}

//=== DojoScene ===========================================================

pub struct DojoScene {
    root: SceneNode,
    selected: usize,
    message_timer: Option<TimerHandle>,
}

impl DojoScene {
    pub fn new() -> Self {
        let menu = DojoMenuItem::ALL
            .iter()
            .fold(SceneNode::container(MENU_PATH), |menu, item| {
                menu.with_child(SceneNode::button(item.node_name(), item.label()))
            });

        let root = SceneNode::container("DojoScene")
            .with_child(SceneNode::camera("Camera2D", Camera::at(512.0, 300.0)))
            .with_child(SceneNode::label("Title", "Dojo"))
            .with_child(menu)
            .with_child(SceneNode::label(MESSAGE_PATH, ""));

        let mut scene = Self {
            root,
            selected: 0,
            message_timer: None,
        };
        scene.refresh_menu();
        scene
    }

    pub fn selected(&self) -> DojoMenuItem {
        DojoMenuItem::ALL[self.selected]
    }

    /// Status message currently shown, empty when none.
    pub fn message(&self) -> &str {
        self.root
            .get_node(MESSAGE_PATH)
            .and_then(SceneNode::text)
            .unwrap_or_default()
    }

    //--- Menu -------------------------------------------------------------

    fn move_cursor(&mut self, down: bool) {
        let count = DojoMenuItem::ALL.len();
        self.selected = if down {
            (self.selected + 1) % count
        } else {
            (self.selected + count - 1) % count
        };
        self.refresh_menu();
    }

    fn activate(&mut self, context: &mut GlobalContext) {
        match self.selected() {
            DojoMenuItem::EnterCity => context.request_scene_change(SceneId::Town),
            DojoMenuItem::Practice => {
                self.show_message("You sit in meditation, sensing the energy of heaven and earth...", context)
            }
            DojoMenuItem::Inventory => self.show_message("The inventory is not yet available.", context),
            DojoMenuItem::Settings => self.show_message("Settings are not yet available.", context),
        }
    }

    fn show_message(&mut self, text: &str, context: &mut GlobalContext) {
        if let Some(label) = self.root.get_node_mut(MESSAGE_PATH) {
            label.set_text(text);
        }
        self.message_timer = Some(context.arm_timer(MESSAGE_DURATION, SceneTimer::ClearMessage));
    }

    fn refresh_menu(&mut self) {
        let selected = self.selected();
        for item in DojoMenuItem::ALL {
            let path = format!("{}/{}", MENU_PATH, item.node_name());
            if let Some(button) = self.root.get_node_mut(&path) {
                if item == selected {
                    button.set_text(format!("> {}", item.label()));
                } else {
                    button.set_text(item.label());
                }
            }
        }
    }
}

impl Default for DojoScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for DojoScene {
    fn root(&self) -> &SceneNode {
        &self.root
    }

    fn root_mut(&mut self) -> &mut SceneNode {
        &mut self.root
    }

    fn update(&mut self, context: &mut GlobalContext) {
        for signal in context.input_signals().to_vec() {
            match signal {
                InputSignal::DirectionChanged(direction) if direction.points_up() => self.move_cursor(false),
                InputSignal::DirectionChanged(direction) if direction.points_down() => self.move_cursor(true),
                InputSignal::DirectionChanged(_) => {}
                InputSignal::InteractPressed => self.activate(context),
                InputSignal::MenuPressed => debug!("Menu pressed in the dojo"),
            }
        }
    }

    fn on_timer(&mut self, handle: TimerHandle, timer: SceneTimer, _context: &mut GlobalContext) {
        // A newer message restarts the clock.
        if timer == SceneTimer::ClearMessage && self.message_timer == Some(handle) {
            self.message_timer = None;
            if let Some(label) = self.root.get_node_mut(MESSAGE_PATH) {
                label.set_text("");
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
