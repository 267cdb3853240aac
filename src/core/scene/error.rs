//=========================================================================
// Scene Errors
//=========================================================================
//
// Recoverable conditions reported by the SceneManager.
//
// Usage errors and load failures are returned to the caller. Internal
// consistency violations are not represented here: they panic.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error as StdError;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::SceneId;

//=== Aliases =============================================================

/// Error type produced by scene code (loaders and updates).
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias for scene manager operations.
pub type Result<T> = std::result::Result<T, SceneError>;

//=== SceneError ==========================================================

/// Errors returned by [`SceneManager`](super::SceneManager) operations.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The identifier is negative (reserved for sentinels).
    #[error("invalid scene id: {0}")]
    InvalidArgument(SceneId),

    /// A scene with this identifier was already added.
    #[error("duplicate scene: scene with id {0} has already been added")]
    DuplicateScene(SceneId),

    /// No scene with this identifier is registered (it may still be loading).
    #[error("scene {0} not found")]
    NotFound(SceneId),

    /// `update` was called before any scene was switched to.
    #[error("no scene loaded ({pending} scene(s) waiting to load)")]
    NoActiveScene { pending: usize },

    /// A background load reported failure; the scene was discarded.
    #[error("scene {id} failed to load")]
    LoadFailed {
        id: SceneId,
        #[source]
        source: BoxError,
    },

    /// Wraps a drain failure surfaced through the per-frame update.
    #[error("loading error: {0}")]
    Loading(#[source] Box<SceneError>),

    /// The loader thread could not be started.
    #[error("failed to spawn loader thread for scene {id}")]
    Spawn {
        id: SceneId,
        #[source]
        source: std::io::Error,
    },

    /// The active scene's update returned an error.
    #[error("scene {id} update failed")]
    Update {
        id: SceneId,
        #[source]
        source: BoxError,
    },

    /// The active scene called back into `update` while being updated.
    #[error("scene manager update called re-entrantly from an active scene")]
    Reentrant,
}

impl SceneError {
    /// Returns the innermost error of a `Loading` chain.
    pub fn root(&self) -> &SceneError {
        match self {
            Self::Loading(inner) => inner.root(),
            other => other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
