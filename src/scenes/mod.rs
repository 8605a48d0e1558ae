//=========================================================================
// Game Scenes
//=========================================================================
//
// The three scenes of the shell and the factory that builds them.
//
//   scenes/dojo    → DojoScene   (Home, Main)
//   scenes/city    → CityScene   (Town)
//   scenes/battle  → BattleScene (Battle, fresh encounter per load)
//
//=========================================================================

//=== Module Declarations =================================================

mod battle;
mod home;
mod town;

//=== Public API ==========================================================

pub use battle::BattleScene;
pub use home::{DojoMenuItem, DojoScene};
pub use town::CityScene;

//=== Internal Dependencies ===============================================

use crate::core::battle::{BattleConfig, BattleEvent};
use crate::core::scene::{SceneFactory, BATTLE_LOCATOR, HOME_LOCATOR, TOWN_LOCATOR};
use crate::core::signal::Signal;

//=== Factory =============================================================

/// Registers every scene under the locators of [`SceneCatalog::standard`].
///
/// Each battle gets its own copy of `config` and of the `battle_events`
/// subscribers.
///
/// [`SceneCatalog::standard`]: crate::core::scene::SceneCatalog::standard
pub fn standard_factory(config: &BattleConfig, battle_events: Signal<BattleEvent>) -> SceneFactory {
    let mut factory = SceneFactory::new();

    factory.register(HOME_LOCATOR, || Ok(Box::new(DojoScene::new())));
    factory.register(TOWN_LOCATOR, || Ok(Box::new(CityScene::new())));

    let config = config.clone();
    factory.register(BATTLE_LOCATOR, move || {
        Ok(Box::new(BattleScene::new(&config, battle_events.clone())))
    });

    factory
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{SceneCatalog, SceneId};

    #[test]
    fn every_catalog_locator_is_registered() {
        let catalog = SceneCatalog::standard();
        let factory = standard_factory(&BattleConfig::default(), Signal::new());

        for id in SceneId::ALL {
            let locator = catalog.locate(id).unwrap();
            assert!(factory.exists(locator), "{:?} → {}", id, locator);
        }
        assert_eq!(factory.len(), 3);
    }

    #[test]
    fn battles_start_fresh_on_every_load() {
        let factory = standard_factory(&BattleConfig::default(), Signal::new());

        let first = factory.instantiate(BATTLE_LOCATOR).unwrap();
        let second = factory.instantiate(BATTLE_LOCATOR).unwrap();

        assert_eq!(first.root().get_node("EnemyArea/EnemyHealthText").unwrap().text(), Some("Demon: 80/80"));
        assert_eq!(second.root().node_count(), first.root().node_count());
    }
}
