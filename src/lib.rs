//=========================================================================
// Aetheric Scene: Library Root
//
// This crate defines the public API surface of the scene runtime.
//
// Responsibilities:
// - Expose the scene lifecycle manager (`SceneManager`) and scene traits
// - Expose the lock-free knob state shared with device event threads
// - Provide a windowed host (`Engine`) that ticks the manager once per frame
//
// Typical usage:
// ```no_run
// use aetheric_scene::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the platform-independent systems (scenes, knobs).
// Applications can use it directly with their own tick source.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration and is kept private; only the
// frame handle and its error type are part of the public API.
//
// `engine` defines the main entry point and builder.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
pub use platform::{Frame, PlatformError};
