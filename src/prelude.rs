//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_scene::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::platform::{Frame, PlatformError};

// Scene system
pub use crate::core::scene::{
    BoxError, DrainPolicy, LoadContext, Scene, SceneError, SceneId, SceneLoader, SceneManager,
    SceneManagerConfig,
};

// Knob input
pub use crate::core::knobs::{
    ControlChange, KnobBinding, KnobConfig, KnobListener, KnobState, KnobWriter, KNOB_COUNT,
};
