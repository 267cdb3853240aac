//=========================================================================
// Scene System
//=========================================================================
//
// Manages scene registration, background loading, and switching of the
// single active scene.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<SceneId, Box<dyn Scene<R>>>
//     ├─ active: Option<SceneId>
//     └─ loads: LoadQueue  ◄── loader threads (one per loading scene)
//
// Flow:
//   update() → drain load results → active Scene::update()
//   draw()   → active Scene::draw()
//
//=========================================================================

//=== Module Declarations =================================================

mod config;
mod error;
mod load_queue;
mod scene_id;
mod scene_manager;

//=== Public API ==========================================================

pub use config::{DrainPolicy, SceneManagerConfig};
pub use error::{BoxError, Result, SceneError};
pub use load_queue::LoadContext;
pub use scene_id::SceneId;
pub use scene_manager::SceneManager;

//=== Scene Trait =========================================================

/// Defines scene behavior: a per-frame update and a draw call.
///
/// `R` is the render target handed to [`Scene::draw`]. Scenes are owned by
/// the [`SceneManager`] once added and stay resident after being switched
/// away from.
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_scene::prelude::*;
/// struct Title;
///
/// impl Scene<Vec<String>> for Title {
///     fn update(&mut self, _manager: &mut SceneManager<Vec<String>>) -> Result<(), BoxError> {
///         Ok(())
///     }
///
///     fn draw(&self, target: &mut Vec<String>) {
///         target.push("title".to_string());
///     }
/// }
/// ```
pub trait Scene<R>: Send {
    /// Called once per frame while this scene is active.
    ///
    /// The manager is passed back so the scene can add scenes or switch
    /// to another one.
    fn update(&mut self, manager: &mut SceneManager<R>) -> std::result::Result<(), BoxError>;

    /// Draws the scene into `target`.
    fn draw(&self, target: &mut R);

    /// Capability query for scenes that need a slow load before use.
    ///
    /// Returning `Some` makes [`SceneManager::add_scene`] load the scene on
    /// a background thread. The answer must not change over the scene's
    /// lifetime.
    fn loader(&mut self) -> Option<&mut dyn SceneLoader> {
        None
    }
}

//=== SceneLoader Trait ===================================================

/// Extended capability for scenes with slow initialization, e.g. assets
/// read from disk.
pub trait SceneLoader {
    /// Runs on a loader thread and may block for as long as it needs.
    ///
    /// Must not touch state shared with the main thread except through
    /// synchronization. Errors are reported by the next
    /// [`SceneManager::update`] and the scene is discarded.
    fn load(&mut self, context: &LoadContext) -> std::result::Result<(), BoxError>;

    /// Runs on the main thread right after the scene is registered.
    ///
    /// Cannot fail; anything fallible belongs in [`SceneLoader::load`].
    fn post_load(&mut self);
}
