//=========================================================================
// Scene Errors
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SceneId;

//=== SceneError ==========================================================

/// Reasons a scene swap can abort.
///
/// All of these leave the manager without an active scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The catalog has no record for the tag.
    Unmapped(SceneId),

    /// The locator resolves to nothing loadable.
    ResourceNotFound { locator: String },

    /// The locator resolved but construction failed.
    InstantiationFailure { locator: String, reason: String },
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unmapped(id) => write!(f, "No catalog entry for scene {:?}", id),
            Self::ResourceNotFound { locator } => write!(f, "Cannot load scene: {}", locator),
            Self::InstantiationFailure { locator, reason } => {
                write!(f, "Cannot instantiate scene {}: {}", locator, reason)
            }
        }
    }
}

impl std::error::Error for SceneError {}

//=========================================================================
// Unit Tests
//=========================================================================
