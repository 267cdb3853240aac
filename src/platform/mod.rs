//=========================================================================
// Platform Subsystem
//
// Windowed tick source for the SceneManager.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌──────────────────────────────────────┐
//  │  Winit Event Loop                    │
//  │   ↓                                  │
//  │  RedrawRequested (frame boundary)    │
//  │   ├─ SceneManager::update()          │     Loader threads
//  │   │    └─ drain LoadQueue ◄──────────┼──── crossbeam channel
//  │   └─ SceneManager::draw(&mut Frame)  │
//  │   ↓                                  │
//  │  request_redraw()                    │
//  └──────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: update then draw, once per frame,
//   always on the event loop thread
// - **Fixed logical size**: the window opens at the manager's layout size;
//   resizing changes only `Frame::window_size`
// - **Update errors end the loop**: the error is logged, kept, and
//   returned from `run()` so the caller decides what to do
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod frame;

pub use frame::Frame;

//=== External Crates =====================================================

use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::scene::{SceneError, SceneManager};

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error (rare, indicates corruption).
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("Window creation failed: {0}")]
    WindowCreation(#[source] winit::error::OsError),

    /// A frame update failed and stopped the loop.
    #[error("Frame {frame} failed: {source}")]
    Scene {
        frame: u64,
        #[source]
        source: SceneError,
    },
}

//=== Platform ============================================================

/// Window owner and frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(manager, title)`
/// 2. **Execution**: `platform.run()` blocks in the event loop
/// 3. **Per frame**: `RedrawRequested` → update → draw → request redraw
/// 4. **Shutdown**: window closed or update failed → loop exits
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Scenes driven once per frame.
    manager: SceneManager<Frame>,

    title: String,
    frames: u64,

    /// First fatal error seen inside the loop, returned from `run()`.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Creates a platform around `manager`. The window is created lazily.
    pub fn new(manager: SceneManager<Frame>, title: impl Into<String>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            manager,
            title: title.into(),
            frames: 0,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes or a frame fails.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the loop cannot start, the window
    /// cannot be created, or a frame update fails.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        info!(target: "platform", "Event loop exited after {} frame(s)", self.frames);

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    //--- Frame Drive ------------------------------------------------------

    /// Runs one frame: update then draw.
    ///
    /// On failure nothing is drawn and the frame counter does not advance.
    fn tick(&mut self, window_size: (u32, u32), scale_factor: f64) -> Result<(), PlatformError> {
        self.manager.update().map_err(|source| PlatformError::Scene {
            frame: self.frames,
            source,
        })?;

        let mut frame = Frame {
            index: self.frames,
            logical_size: self.manager.layout(window_size.0, window_size.1),
            window_size,
            scale_factor,
        };
        self.manager.draw(&mut frame);

        self.frames += 1;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: PlatformError) {
        error!(target: "platform", "{}", err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called when app becomes active (startup or mobile resume).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.manager.config().logical_size;
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, PlatformError::WindowCreation(e)),
        }
    }

    /// Handles per-window events.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                let Some((size, scale)) = self
                    .window
                    .as_ref()
                    .map(|w| (w.inner_size(), w.scale_factor()))
                else {
                    return;
                };

                if let Err(e) = self.tick((size.width, size.height), scale) {
                    self.fail(event_loop, e);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                // Ignore: Resized, Focused, input (scenes poll their own sources)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{BoxError, Scene, SceneId, SceneManagerConfig};
    use std::sync::{Arc, Mutex};

    /// Records every frame it is asked to draw.
    struct Recorder {
        seen: Arc<Mutex<Vec<Frame>>>,
    }

    impl Scene<Frame> for Recorder {
        fn update(&mut self, _manager: &mut SceneManager<Frame>) -> Result<(), BoxError> {
            Ok(())
        }

        fn draw(&self, target: &mut Frame) {
            self.seen.lock().unwrap().push(*target);
        }
    }

    fn platform_with_recorder() -> (Platform, Arc<Mutex<Vec<Frame>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SceneManager::with_config(SceneManagerConfig {
            logical_size: (320, 240),
            ..SceneManagerConfig::default()
        });
        manager
            .add_scene(SceneId::new(0), Recorder { seen: Arc::clone(&seen) })
            .unwrap();
        manager.switch_scene(SceneId::new(0)).unwrap();
        (Platform::new(manager, "test"), seen)
    }

    #[test]
    fn platform_creation() {
        let (platform, _) = platform_with_recorder();
        assert!(platform.window().is_none(), "Window should be created lazily");
    }

    #[test]
    fn tick_updates_then_draws_with_layout_size() {
        let (mut platform, seen) = platform_with_recorder();

        platform.tick((1280, 720), 2.0).unwrap();
        platform.tick((1280, 720), 2.0).unwrap();

        let frames = seen.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames[1].index, 1);
        assert_eq!(frames[1].logical_size, (320, 240));
        assert_eq!(frames[1].window_size, (1280, 720));
    }

    #[test]
    fn tick_without_scene_fails_and_skips_draw() {
        let mut platform = Platform::new(SceneManager::new(), "empty");

        let err = platform.tick((640, 480), 1.0).unwrap_err();

        assert!(matches!(
            err,
            PlatformError::Scene { frame: 0, source: SceneError::NoActiveScene { pending: 0 } }
        ));
        assert_eq!(platform.frames, 0);
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
