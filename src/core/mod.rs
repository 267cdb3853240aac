//=========================================================================
// Core Systems
//
// Platform-independent building blocks driven by the frame thread.
//
// Responsibilities:
// - `scene`: scene registry, background loading, active-scene switching
// - `knobs`: lock-free knob values shared with the device event thread
//
// Notes:
// Nothing in here touches the window or the OS event loop. The platform
// layer owns the tick source and calls into these modules once per frame.
//
//=========================================================================

pub mod knobs;
pub mod scene;

//=== Re-exports ==========================================================

pub use knobs::{ControlChange, KnobConfig, KnobState, KnobWriter};
pub use scene::{Scene, SceneError, SceneId, SceneLoader, SceneManager};
