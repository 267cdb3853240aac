//=========================================================================
// Aetheric Scene Engine
//
// Main entry point: configures a SceneManager and runs it in a window.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                                   │
//         ├─ with_logical_size()     └─ owns SceneManager<Frame>         └─ winit loop
//         ├─ with_title()                                                   update → draw
//         ├─ with_drain_policy()
//         └─ with_channel_capacity()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::scene::{DrainPolicy, SceneError, SceneManager, SceneManagerConfig};
use crate::platform::{Frame, Platform, PlatformError};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Logical size**: 640x480
/// - **Title**: "Aetheric"
/// - **Drain policy**: one finished load per frame
/// - **Load channel capacity**: 16 results
///
/// # Examples
///
/// ```no_run
/// use aetheric_scene::prelude::*;
///
/// struct Title;
///
/// impl Scene<Frame> for Title {
///     fn update(&mut self, _manager: &mut SceneManager<Frame>) -> Result<(), BoxError> {
///         Ok(())
///     }
///
///     fn draw(&self, _target: &mut Frame) {}
/// }
///
/// EngineBuilder::new()
///     .with_title("spin")
///     .with_logical_size(640, 480)
///     .build()
///     .init(|scenes| {
///         scenes.add_scene(SceneId::new(0), Title)?;
///         scenes.switch_scene(SceneId::new(0))
///     })
///     .expect("scene setup")
///     .run()
///     .expect("engine run");
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    title: String,
    config: SceneManagerConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Aetheric".to_string(),
            config: SceneManagerConfig::default(),
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the fixed logical render surface returned by `layout`.
    ///
    /// Default: 640x480
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_logical_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Logical size must be positive, got {}x{}", width, height);
        self.config.logical_size = (width, height);
        self
    }

    /// Sets how many finished loads are drained per frame.
    ///
    /// Default: [`DrainPolicy::One`]
    pub fn with_drain_policy(mut self, policy: DrainPolicy) -> Self {
        self.config.drain_policy = policy;
        self
    }

    /// Sets the capacity of the load-result channel.
    ///
    /// `0` makes every loader thread wait until the frame thread takes its
    /// result.
    ///
    /// Default: 16
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = Some(capacity);
        self
    }

    /// Uses an unbounded load-result channel.
    pub fn with_unbounded_channel(mut self) -> Self {
        self.config.channel_capacity = None;
        self
    }

    /// Builds the engine with an empty scene manager.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (size: {}x{}, drain: {:?}, channel: {:?})",
            self.config.logical_size.0,
            self.config.logical_size.1,
            self.config.drain_policy,
            self.config.channel_capacity
        );

        Engine {
            manager: SceneManager::with_config(self.config),
            title: self.title,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Owns the scene manager and runs it in a window.
///
/// Create via [`EngineBuilder`].
pub struct Engine {
    manager: SceneManager<Frame>,
    title: String,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Registers scenes before the loop starts.
    ///
    /// # Errors
    ///
    /// Returns whatever the closure returns.
    pub fn init<F>(mut self, init_fn: F) -> Result<Self, SceneError>
    where
        F: FnOnce(&mut SceneManager<Frame>) -> Result<(), SceneError>,
    {
        info!("Initializing scenes");
        init_fn(&mut self.manager)?;
        info!(
            "Scene initialization complete ({} registered, {} loading)",
            self.manager.scene_count(),
            self.manager.pending_loads()
        );
        Ok(self)
    }

    /// Direct access to the scene manager.
    pub fn scenes(&mut self) -> &mut SceneManager<Frame> {
        &mut self.manager
    }

    //--- Execution --------------------------------------------------------

    /// Opens the window and drives the scene manager until the window
    /// closes or a frame fails.
    ///
    /// Must be called on the main thread.
    ///
    /// # Errors
    ///
    /// See [`PlatformError`].
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime");

        let platform = Platform::new(self.manager, self.title);
        let result = platform.run();

        match &result {
            Ok(()) => info!("Engine shutdown complete"),
            Err(e) => error!("Engine stopped: {}", e),
        }
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
