//=========================================================================
// Scene Factory
//=========================================================================
//
// Locator → constructor registry. Stands in for a resource loader: a
// locator with no registered constructor is "not found", a constructor
// that returns Err failed to instantiate.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneError};

//=== Types ===============================================================

/// Outcome of one scene constructor call.
pub type SceneResult = Result<Box<dyn Scene>, Box<dyn Error + Send + Sync>>;

type Constructor = Box<dyn Fn() -> SceneResult + Send>;

//=== SceneFactory ========================================================

/// Registry of scene constructors keyed by locator.
#[derive(Default)]
pub struct SceneFactory {
    constructors: HashMap<String, Constructor>,
}

impl SceneFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the constructor for `locator`, replacing any previous one.
    pub fn register<F>(&mut self, locator: impl Into<String>, constructor: F)
    where
        F: Fn() -> SceneResult + Send + 'static,
    {
        let locator = locator.into();
        if self.constructors.contains_key(&locator) {
            warn!("Scene constructor for {} was already registered and has been replaced", locator);
        }
        self.constructors.insert(locator, Box::new(constructor));
    }

    /// Whether anything is registered under `locator`.
    pub fn exists(&self, locator: &str) -> bool {
        self.constructors.contains_key(locator)
    }

    /// Builds a fresh scene instance.
    pub fn instantiate(&self, locator: &str) -> Result<Box<dyn Scene>, SceneError> {
        let constructor = self
            .constructors
            .get(locator)
            .ok_or_else(|| SceneError::ResourceNotFound {
                locator: locator.to_string(),
            })?;

        debug!("Instantiating scene from {}", locator);
        constructor().map_err(|err| SceneError::InstantiationFailure {
            locator: locator.to_string(),
            reason: err.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for SceneFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locators: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        locators.sort_unstable();
        f.debug_struct("SceneFactory").field("locators", &locators).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::globals::GlobalContext;
    use crate::core::scene::SceneNode;

    struct Empty(SceneNode);

    impl Scene for Empty {
        fn root(&self) -> &SceneNode {
            &self.0
        }
        fn root_mut(&mut self) -> &mut SceneNode {
            &mut self.0
        }
        fn update(&mut self, _context: &mut GlobalContext) {}
    }

    #[test]
    fn unknown_locator_is_not_found() {
        let factory = SceneFactory::new();
        assert!(matches!(
            factory.instantiate("scenes/nowhere"),
            Err(SceneError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn constructor_error_is_instantiation_failure() {
        let mut factory = SceneFactory::new();
        factory.register("scenes/broken", || Err("missing texture".into()));

        match factory.instantiate("scenes/broken") {
            Err(SceneError::InstantiationFailure { locator, reason }) => {
                assert_eq!(locator, "scenes/broken");
                assert_eq!(reason, "missing texture");
            }
            _ => panic!("expected InstantiationFailure"),
        }
    }

    #[test]
    fn each_instantiation_is_a_fresh_instance() {
        let mut factory = SceneFactory::new();
        factory.register("scenes/empty", || Ok(Box::new(Empty(SceneNode::container("Empty")))));

        let mut first = factory.instantiate("scenes/empty").unwrap();
        first.root_mut().add_child(SceneNode::container("Extra"));
        let second = factory.instantiate("scenes/empty").unwrap();

        assert!(factory.exists("scenes/empty"));
        assert_eq!(first.root().node_count(), 2);
        assert_eq!(second.root().node_count(), 1);
    }
}
