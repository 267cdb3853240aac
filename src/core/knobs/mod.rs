//=========================================================================
// Knob Input
//=========================================================================
//
// Shared knob state written by a device event thread and read once per
// frame by scenes.
//
// Architecture:
//   KnobConfig ──► KnobState ──writer()──► KnobWriter (device thread)
//                     │
//                     └─ update() / knob(i) (frame thread)
//
//=========================================================================

//=== Module Declarations =================================================

mod knob_config;
mod knob_state;
mod listener;

//=== Public API ==========================================================

pub use knob_config::{ConfigError, KnobBinding, KnobConfig, MAX_CHANNEL};
pub use knob_state::{ControlChange, KnobState, KnobWriter, KNOB_COUNT, MAX_KNOB_VALUE};
pub use listener::KnobListener;
