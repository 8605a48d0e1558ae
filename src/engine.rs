//=========================================================================
// Game
//
// Composition root and entry point.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──run()──>  [Runtime]
//         │                       │
//         ├─ with_tps()           ├─ init(|systems| ..)
//         ├─ with_catalog()       └─ run(): spawns the logic thread,
//         ├─ with_battle_config()           runs the platform loop,
//         └─ on_*() listeners               blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::battle::{BattleConfig, BattleEvent};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::scene::{SceneCatalog, SceneId};
use crate::core::signal::Signal;
use crate::core::{CoreSystemsOrchestrator, GlobalSystems};
use crate::platform::Platform;
use crate::scenes;

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Catalog**: [`SceneCatalog::standard`]
/// - **Battle config**: [`BattleConfig::default`]
///
/// # Examples
///
/// ```no_run
/// use cultivation_shell::GameBuilder;
/// use cultivation_shell::core::input::{GameAction, KeyCode};
///
/// GameBuilder::new()
///     .with_tps(120.0)
///     .with_seed(7)
///     .on_scene_changed(|id| println!("now in {:?}", id))
///     .build()
///     .init(|systems| {
///         systems.input.bind_key(KeyCode::KeyE, GameAction::Interact);
///     })
///     .run();
/// ```
pub struct GameBuilder {
    tps: f64,
    channel_capacity: usize,
    catalog: SceneCatalog,
    battle_config: BattleConfig,
    scene_changed: Signal<SceneId>,
    battle_events: Signal<BattleEvent>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            catalog: SceneCatalog::standard(),
            battle_config: BattleConfig::default(),
            scene_changed: Signal::new(),
            battle_events: Signal::new(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Each tick advances the logic clock by exactly `1 / tps` seconds.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → logic channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_catalog(mut self, catalog: SceneCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_battle_config(mut self, config: BattleConfig) -> Self {
        self.battle_config = config;
        self
    }

    /// Seeds the escape roll of every battle.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.battle_config.seed = Some(seed);
        self
    }

    /// Subscribes to committed scene changes.
    pub fn on_scene_changed<F>(mut self, listener: F) -> Self
    where
        F: Fn(&SceneId) + Send + Sync + 'static,
    {
        self.scene_changed.connect(listener);
        self
    }

    /// Subscribes to the events of every battle.
    pub fn on_battle_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&BattleEvent) + Send + Sync + 'static,
    {
        self.battle_events.connect(listener);
        self
    }

    /// Builds the game. Scenes come from [`scenes::standard_factory`].
    pub fn build(self) -> Game {
        info!("Building game (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let factory = scenes::standard_factory(&self.battle_config, self.battle_events);
        let mut systems = GlobalSystems::new(self.catalog, factory);
        systems.scene_manager.scene_changed = self.scene_changed;

        Game {
            orchestrator: CoreSystemsOrchestrator::new(systems),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// Game runtime.
///
/// ```text
/// Game (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, Scheduler, SceneManager → active Scene
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Game {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
}

impl Game {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to [`GlobalSystems`] (bindings, extra signal
    /// listeners) before the game starts.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems),
    {
        info!("Initializing game systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → logic channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` is sent and the logic thread exits
    pub fn run(self) {
        info!("Starting game runtime (TPS: {})", self.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Game shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::battle::BattleOutcome;
    use crate::core::input::{InputEvent, KeyCode};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    //=====================================================================
    // GameBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = GameBuilder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.catalog, SceneCatalog::standard());
        assert_eq!(builder.battle_config, BattleConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        let builder = GameBuilder::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        GameBuilder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        GameBuilder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        GameBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_with_seed_sets_battle_seed() {
        let builder = GameBuilder::new().with_seed(42);
        assert_eq!(builder.battle_config.seed, Some(42));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let game = GameBuilder::new()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_battle_config(BattleConfig::default().with_escape_chance(1.0))
            .build();

        assert_eq!(game.tps, 120.0);
        assert_eq!(game.channel_capacity, 256);
    }

    #[test]
    fn init_reaches_the_systems() {
        let mut listeners = 0;
        GameBuilder::new()
            .on_scene_changed(|_| {})
            .build()
            .init(|systems| listeners = systems.scene_manager.scene_changed.len());

        assert_eq!(listeners, 1);
    }

    //=====================================================================
    // Full Flow
    //=====================================================================

    fn press(key: KeyCode) -> Vec<Vec<InputEvent>> {
        vec![vec![InputEvent::KeyDown(key), InputEvent::KeyUp(key)]]
    }

    #[test]
    fn dojo_to_city_to_battle_and_back() {
        let scenes = Arc::new(Mutex::new(Vec::new()));
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let scene_log = Arc::clone(&scenes);
        let outcome_log = Arc::clone(&outcomes);

        let mut game = GameBuilder::new()
            .with_battle_config(BattleConfig::default().with_escape_chance(1.0))
            .with_seed(1)
            .on_scene_changed(move |id| scene_log.lock().unwrap().push(*id))
            .on_battle_event(move |event| {
                if let BattleEvent::Ended(outcome) = event {
                    outcome_log.lock().unwrap().push(*outcome);
                }
            })
            .build();
        let core = &mut game.orchestrator;
        let dt = Duration::from_millis(16);

        core.start();
        core.tick(Vec::new(), dt);
        assert_eq!(core.systems().scene_manager.active_id(), Some(SceneId::Home));

        // "Enter City" is selected first.
        core.tick(press(KeyCode::KeyE), dt);
        core.tick(Vec::new(), dt);
        assert_eq!(core.systems().scene_manager.active_id(), Some(SceneId::Town));

        core.tick(press(KeyCode::Enter), dt);
        core.tick(Vec::new(), dt);
        assert_eq!(core.systems().scene_manager.active_id(), Some(SceneId::Battle));
        assert!(core.systems().scene_manager.anchor().is_some_and(|a| a.path == "BattleScene#Camera2D"));

        core.tick(press(KeyCode::Escape), dt);
        assert_eq!(*outcomes.lock().unwrap(), vec![BattleOutcome::Escaped]);

        core.tick(Vec::new(), Duration::from_millis(1500));
        core.tick(Vec::new(), dt);
        assert_eq!(core.systems().scene_manager.active_id(), Some(SceneId::Main));

        assert_eq!(
            *scenes.lock().unwrap(),
            vec![SceneId::Home, SceneId::Town, SceneId::Battle, SceneId::Main]
        );
    }
}
