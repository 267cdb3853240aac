//=========================================================================
// Scene Manager
//=========================================================================
//
// Manages scene registration, background loading, and switching of the
// active scene.
//
// Scenes are stored in a HashMap by id. Exactly one of them (or none) is
// active and receives update/draw calls. Switching away from a scene
// keeps it resident, so switching back needs no reconstruction.
//
// Threading: every method takes the manager by reference from the thread
// that drives update(). Loader threads never see the manager; they only
// hold a channel sender owned by the LoadQueue.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::config::{DrainPolicy, SceneManagerConfig};
use super::error::{BoxError, Result, SceneError};
use super::load_queue::{LoadQueue, LoadResult};
use super::{Scene, SceneId};

//=== Scene Manager =======================================================

/// Owns every registered scene and drives the active one.
///
/// `R` is the render target type passed through to [`Scene::draw`].
///
/// # Usage Contract
///
/// Not safe to call from any thread other than the one calling
/// [`SceneManager::update`]. Ownership enforces this: the manager is not
/// shared, and scenes only ever receive `&mut SceneManager` on that thread.
pub struct SceneManager<R> {
    /// Registered scenes. A `None` slot is the active scene lent out for
    /// the duration of its own update call; its key stays registered.
    scenes: HashMap<SceneId, Option<Box<dyn Scene<R>>>>,
    active: Option<SceneId>,
    loads: LoadQueue<R>,
    config: SceneManagerConfig,
    updating: bool,
}

impl<R: 'static> SceneManager<R> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty manager with default settings.
    pub fn new() -> Self {
        Self::with_config(SceneManagerConfig::default())
    }

    /// Creates an empty manager with the given settings.
    pub fn with_config(config: SceneManagerConfig) -> Self {
        Self {
            scenes: HashMap::new(),
            active: None,
            loads: LoadQueue::new(config.channel_capacity),
            config,
            updating: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Adds a scene under `id`.
    ///
    /// Plain scenes are registered immediately. Scenes whose
    /// [`Scene::loader`] returns `Some` are loaded on a background thread
    /// and only appear once a later drain picks up their result.
    ///
    /// # Errors
    ///
    /// - [`SceneError::InvalidArgument`] if `id` is negative
    /// - [`SceneError::DuplicateScene`] if `id` is registered or loading
    /// - [`SceneError::Spawn`] if the loader thread could not start
    pub fn add_scene<T>(&mut self, id: SceneId, scene: T) -> Result<()>
    where
        T: Scene<R> + 'static,
    {
        self.add_boxed_scene(id, Box::new(scene))
    }

    /// Boxed form of [`SceneManager::add_scene`].
    pub fn add_boxed_scene(&mut self, id: SceneId, mut scene: Box<dyn Scene<R>>) -> Result<()> {
        if !id.is_valid() {
            return Err(SceneError::InvalidArgument(id));
        }

        if self.scenes.contains_key(&id) || self.loads.is_loading(id) {
            return Err(SceneError::DuplicateScene(id));
        }

        if scene.loader().is_none() {
            debug!("Registered scene {}", id);
            self.scenes.insert(id, Some(scene));
            return Ok(());
        }

        self.loads.spawn(id, scene)?;
        debug!("Scene {} loading in background ({} pending)", id, self.loads.pending());
        Ok(())
    }

    //--- Loading ----------------------------------------------------------

    /// Drains at most one finished background load without blocking.
    ///
    /// Returns `Ok(true)` if a scene was registered, `Ok(false)` if no
    /// result was waiting.
    ///
    /// # Errors
    ///
    /// [`SceneError::LoadFailed`] if the drained load failed. The scene is
    /// discarded and the rest of the manager is unaffected.
    pub fn update_loading(&mut self) -> Result<bool> {
        match self.loads.try_next() {
            Some(result) => self.finish_load(result).map(|()| true),
            None => Ok(false),
        }
    }

    /// Drains every finished background load currently available.
    ///
    /// Stops at the first failure; later results stay queued for the next
    /// call. Returns the number of scenes registered.
    pub fn update_loading_all(&mut self) -> Result<usize> {
        let mut registered = 0;
        while let Some(result) = self.loads.try_next() {
            self.finish_load(result)?;
            registered += 1;
        }
        Ok(registered)
    }

    /// Raises the cancellation flag for every load currently in flight.
    ///
    /// Loaders observe it through
    /// [`LoadContext::is_cancelled`](super::LoadContext::is_cancelled).
    /// Their results, failed or not, are still drained as usual.
    pub fn cancel_pending_loads(&mut self) {
        if self.loads.pending() > 0 {
            info!("Cancelling {} pending scene load(s)", self.loads.pending());
        }
        self.loads.cancel_all();
    }

    //--- Switching --------------------------------------------------------

    /// Makes `id` the active scene.
    ///
    /// The previous scene gets no teardown call and stays registered.
    ///
    /// # Errors
    ///
    /// - [`SceneError::InvalidArgument`] if `id` is negative
    /// - [`SceneError::NotFound`] if `id` is not registered, including
    ///   while it is still loading
    pub fn switch_scene(&mut self, id: SceneId) -> Result<()> {
        if !id.is_valid() {
            return Err(SceneError::InvalidArgument(id));
        }

        if !self.scenes.contains_key(&id) {
            return Err(SceneError::NotFound(id));
        }

        debug!("Switching scene {:?} -> {}", self.active, id);
        self.active = Some(id);
        Ok(())
    }

    /// Like [`SceneManager::switch_scene`] but treats failure as a bug.
    ///
    /// # Panics
    ///
    /// Panics if the switch fails.
    pub fn must_switch_scene(&mut self, id: SceneId) {
        if let Err(e) = self.switch_scene(id) {
            panic!("{}", e);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// True if `id` is registered. Scenes still loading are not.
    pub fn has_scene(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    /// The active scene, if any.
    pub fn active_scene(&self) -> Option<SceneId> {
        self.active
    }

    /// Number of background loads not yet drained.
    pub fn pending_loads(&self) -> usize {
        self.loads.pending()
    }

    /// Number of registered scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Settings this manager was built with.
    pub fn config(&self) -> &SceneManagerConfig {
        &self.config
    }

    //--- Frame Drive ------------------------------------------------------

    /// Runs one frame: drains finished loads, then updates the active scene.
    ///
    /// # Errors
    ///
    /// - [`SceneError::Loading`] wrapping a failed drain
    /// - [`SceneError::NoActiveScene`] if nothing was switched to yet
    /// - [`SceneError::Update`] if the active scene's update failed
    /// - [`SceneError::Reentrant`] if called from inside a scene update
    pub fn update(&mut self) -> Result<()> {
        if self.updating {
            return Err(SceneError::Reentrant);
        }

        let drained = match self.config.drain_policy {
            DrainPolicy::One => self.update_loading().map(|_| ()),
            DrainPolicy::All => self.update_loading_all().map(|_| ()),
        };
        drained.map_err(|e| SceneError::Loading(Box::new(e)))?;

        let Some(id) = self.active else {
            return Err(SceneError::NoActiveScene { pending: self.loads.pending() });
        };

        let Some(scene) = self.scenes.get_mut(&id).and_then(Option::take) else {
            panic!("active scene {} is not resident in the registry", id);
        };

        let outcome = LentScene::new(self, id, scene).update();

        outcome.map_err(|source| SceneError::Update { id, source })
    }

    /// Draws the active scene into `target`.
    ///
    /// Without an active scene nothing is drawn and a warning is logged;
    /// callers should let [`SceneManager::update`] succeed first.
    pub fn draw(&self, target: &mut R) {
        let scene = self
            .active
            .and_then(|id| self.scenes.get(&id))
            .and_then(Option::as_ref);

        match scene {
            Some(scene) => scene.draw(target),
            None => warn!("draw called with no active scene"),
        }
    }

    /// Returns the fixed logical render size, ignoring the outer window size.
    pub fn layout(&self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        self.config.logical_size
    }

    //--- Internal Helpers -------------------------------------------------

    fn finish_load(&mut self, result: LoadResult<R>) -> Result<()> {
        let LoadResult { id, mut scene, error } = result;

        if let Some(source) = error {
            warn!("Scene {} failed to load: {}", id, source);
            return Err(SceneError::LoadFailed { id, source });
        }

        if let Some(loader) = scene.loader() {
            loader.post_load();
        }
        self.scenes.insert(id, Some(scene));

        info!("Scene {} loaded ({} still pending)", id, self.loads.pending());
        Ok(())
    }
}

//=== LentScene ===========================================================

/// The active scene taken out of its slot for the length of its update.
///
/// Dropping puts the scene back and clears the update flag, so a scene
/// that panics leaves the manager usable once the panic is caught.
struct LentScene<'a, R: 'static> {
    manager: &'a mut SceneManager<R>,
    id: SceneId,
    scene: Option<Box<dyn Scene<R>>>,
}

impl<'a, R: 'static> LentScene<'a, R> {
    fn new(manager: &'a mut SceneManager<R>, id: SceneId, scene: Box<dyn Scene<R>>) -> Self {
        manager.updating = true;
        Self { manager, id, scene: Some(scene) }
    }

    fn update(mut self) -> std::result::Result<(), BoxError> {
        match self.scene.as_mut() {
            Some(scene) => scene.update(self.manager),
            None => Ok(()),
        }
    }
}

impl<R: 'static> Drop for LentScene<'_, R> {
    fn drop(&mut self) {
        if let Some(scene) = self.scene.take() {
            self.manager.scenes.insert(self.id, Some(scene));
        }
        self.manager.updating = false;
    }
}

impl<R: 'static> Default for SceneManager<R> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
