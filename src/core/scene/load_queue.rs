//=========================================================================
// Load Queue
//=========================================================================
//
// Background loading of scenes with the SceneLoader capability.
//
// Architecture:
//   spawn(id, scene) ──► loader thread ──► load() ──┐
//                                                   │ LoadResult
//   try_next() ◄──────── crossbeam channel ◄────────┘
//
// Loader threads own their scene until the result is sent back. The
// pending count and in-flight set are only touched by the owner of the
// queue (the main thread), never by loader threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TryRecvError};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::error::{BoxError, Result, SceneError};
use super::{Scene, SceneId};

//=== LoadContext =========================================================

/// Handed to [`SceneLoader::load`](super::SceneLoader::load).
///
/// Long loads should poll [`LoadContext::is_cancelled`] and bail out with
/// an error once it returns true.
#[derive(Debug, Clone)]
pub struct LoadContext {
    id: SceneId,
    cancelled: Arc<AtomicBool>,
}

impl LoadContext {
    pub(crate) fn new(id: SceneId, cancelled: Arc<AtomicBool>) -> Self {
        Self { id, cancelled }
    }

    /// Identifier the scene is being loaded under.
    pub fn scene_id(&self) -> SceneId {
        self.id
    }

    /// True once [`SceneManager::cancel_pending_loads`](super::SceneManager::cancel_pending_loads)
    /// has been called while this load was in flight.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

//=== LoadResult ==========================================================

/// Outcome of one background load, sent back to the main thread.
pub(crate) struct LoadResult<R> {
    pub id: SceneId,
    pub scene: Box<dyn Scene<R>>,
    pub error: Option<BoxError>,
}

//=== LoadQueue ===========================================================

/// Tracks outstanding loads and receives their results.
pub(crate) struct LoadQueue<R> {
    sender: Sender<LoadResult<R>>,
    receiver: Receiver<LoadResult<R>>,
    pending: usize,
    in_flight: HashSet<SceneId>,
    cancelled: Arc<AtomicBool>,
}

impl<R: 'static> LoadQueue<R> {
    //--- Construction -----------------------------------------------------

    /// Creates a queue whose result channel holds `capacity` results
    /// (`None` for unbounded).
    pub fn new(capacity: Option<usize>) -> Self {
        let (sender, receiver) = match capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };

        Self {
            sender,
            receiver,
            pending: 0,
            in_flight: HashSet::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Number of loads started but not yet drained.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// True if a load for `id` has been started and not yet drained.
    pub fn is_loading(&self, id: SceneId) -> bool {
        self.in_flight.contains(&id)
    }

    /// Number of results waiting in the channel.
    pub fn ready(&self) -> usize {
        self.receiver.len()
    }

    //--- Spawning ---------------------------------------------------------

    /// Starts loading `scene` on a new thread.
    ///
    /// The pending count is raised before the thread exists, so a drain
    /// can never observe a false "nothing loading".
    pub fn spawn(&mut self, id: SceneId, mut scene: Box<dyn Scene<R>>) -> Result<()> {
        self.pending += 1;
        self.in_flight.insert(id);

        let sender = self.sender.clone();
        let cancelled = Arc::clone(&self.cancelled);

        let spawned = thread::Builder::new()
            .name(format!("scene-load-{}", id))
            .spawn(move || {
                let context = LoadContext::new(id, cancelled);
                let started = Instant::now();

                let error = match scene.loader() {
                    Some(loader) => loader.load(&context).err(),
                    None => None,
                };

                debug!(
                    target: "scene::load",
                    "Scene {} load finished in {:?} ({})",
                    id,
                    started.elapsed(),
                    if error.is_some() { "failed" } else { "ok" }
                );

                if sender.send(LoadResult { id, scene, error }).is_err() {
                    warn!(target: "scene::load", "Scene manager gone, discarding scene {}", id);
                }
            });

        match spawned {
            Ok(_) => {
                trace!(target: "scene::load", "Loader thread started for scene {}", id);
                Ok(())
            }
            Err(source) => {
                self.pending -= 1;
                self.in_flight.remove(&id);
                Err(SceneError::Spawn { id, source })
            }
        }
    }

    //--- Draining ---------------------------------------------------------

    /// Takes at most one finished load without blocking.
    ///
    /// # Panics
    ///
    /// Panics if a result arrives while no load is pending. That can only
    /// happen through a bug in this module.
    pub fn try_next(&mut self) -> Option<LoadResult<R>> {
        let result = match self.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            // The queue holds its own sender, so the channel stays connected.
            Err(TryRecvError::Disconnected) => return None,
        };

        self.pending = match self.pending.checked_sub(1) {
            Some(pending) => pending,
            None => panic!(
                "unexpected load result: scene_id={}, err={:?}",
                result.id, result.error
            ),
        };
        self.in_flight.remove(&result.id);

        Some(result)
    }

    //--- Cancellation -----------------------------------------------------

    /// Raises the cancellation flag seen by the loads currently in flight.
    ///
    /// Loads started afterwards get a fresh, unraised flag.
    pub fn cancel_all(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.cancelled = Arc::new(AtomicBool::new(false));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
