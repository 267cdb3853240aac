//=========================================================================
// Knob Configuration
//=========================================================================
//
// Persisted device selection and knob bindings.
//
// Format (JSON):
// ```text
// {
//   "midi_device": "Arturia BeatStep",
//   "knobs": [ { "channel": 0, "controller": 20 }, ... ]
// }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::knob_state::{KNOB_COUNT, MAX_KNOB_VALUE};

/// Highest MIDI channel number (channels are 0-based).
pub const MAX_CHANNEL: u8 = 15;

//=== ConfigError =========================================================

/// Errors raised while reading, writing or validating a [`KnobConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{count} knobs configured, at most {max} supported", max = KNOB_COUNT)]
    TooManyKnobs { count: usize },

    #[error("knob {index}: channel {channel} out of range [0-{max}]", max = MAX_CHANNEL)]
    ChannelOutOfRange { index: usize, channel: u8 },

    #[error("knob {index}: controller {controller} out of range [0-{max}]", max = MAX_KNOB_VALUE)]
    ControllerOutOfRange { index: usize, controller: u8 },
}

impl ConfigError {
    /// True if the error means the file does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

//=== KnobBinding =========================================================

/// Control-change address a knob listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KnobBinding {
    pub channel: u8,
    pub controller: u8,
}

impl KnobBinding {
    pub const fn new(channel: u8, controller: u8) -> Self {
        Self { channel, controller }
    }
}

//=== KnobConfig ==========================================================

/// Device name and per-knob bindings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KnobConfig {
    /// Name of the MIDI input port. Empty means "not configured".
    #[serde(default)]
    pub midi_device: String,

    /// Binding `i` drives knob `i`.
    #[serde(default)]
    pub knobs: Vec<KnobBinding>,
}

impl KnobConfig {
    /// True once a device has been chosen.
    pub fn is_configured(&self) -> bool {
        !self.midi_device.is_empty()
    }

    /// Checks knob count and channel/controller ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.knobs.len() > KNOB_COUNT {
            return Err(ConfigError::TooManyKnobs { count: self.knobs.len() });
        }

        for (index, knob) in self.knobs.iter().enumerate() {
            if knob.channel > MAX_CHANNEL {
                return Err(ConfigError::ChannelOutOfRange { index, channel: knob.channel });
            }
            if knob.controller > MAX_KNOB_VALUE {
                return Err(ConfigError::ControllerOutOfRange {
                    index,
                    controller: knob.controller,
                });
            }
        }

        Ok(())
    }

    //--- Persistence ------------------------------------------------------

    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: KnobConfig = serde_json::from_str(&text)?;
        config.validate()?;

        info!(target: "knobs", "Loaded {}", path.display());
        Ok(config)
    }

    /// Validates and writes the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        self.validate()?;

        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;

        debug!(target: "knobs", "Saved {}", path.display());
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
