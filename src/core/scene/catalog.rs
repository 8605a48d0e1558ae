//=========================================================================
// Scene Catalog
//=========================================================================
//
// Fixed SceneId → locator table, populated once at startup.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::SceneId;

//=== Locators ============================================================

pub(crate) const HOME_LOCATOR: &str = "scenes/dojo";
pub(crate) const TOWN_LOCATOR: &str = "scenes/city";
pub(crate) const BATTLE_LOCATOR: &str = "scenes/battle";

//=== SceneCatalog ========================================================

/// Read-only mapping from scene tag to the locator its factory is
/// registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneCatalog {
    records: HashMap<SceneId, String>,
}

impl SceneCatalog {
    /// Creates a catalog with no records.
    pub fn empty() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// The game's standard table. `Main` shares `Home`'s locator.
    pub fn standard() -> Self {
        Self::empty()
            .with_locator(SceneId::Home, HOME_LOCATOR)
            .with_locator(SceneId::Town, TOWN_LOCATOR)
            .with_locator(SceneId::Battle, BATTLE_LOCATOR)
            .with_locator(SceneId::Main, HOME_LOCATOR)
    }

    /// Adds or replaces a record. Only usable before the catalog is handed
    /// to the SceneManager.
    pub fn with_locator(mut self, id: SceneId, locator: impl Into<String>) -> Self {
        if let Some(previous) = self.records.insert(id, locator.into()) {
            warn!("Catalog entry for {:?} replaced (was {})", id, previous);
        }
        self
    }

    /// Resolves a tag to its locator.
    pub fn locate(&self, id: SceneId) -> Option<&str> {
        self.records.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
