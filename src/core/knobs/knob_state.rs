//=========================================================================
// Knob State
//=========================================================================
//
// Lock-free hand-off of knob positions from the device thread to the
// frame thread.
//
// Architecture:
//   device thread: ControlChange → KnobWriter::handle() → AtomicU8 store
//   frame thread:  KnobState::update() → AtomicU8 load → snapshot
//
// Each slot is independent. A snapshot is not a consistent cross-slot
// transaction: two knobs read in the same frame may reflect events in
// either arrival order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::knob_config::{KnobBinding, KnobConfig};

//=== Constants ===========================================================

/// Number of physical knobs tracked.
pub const KNOB_COUNT: usize = 4;

/// Largest value a 7-bit control change can carry.
pub const MAX_KNOB_VALUE: u8 = 127;

//=== ControlChange =======================================================

/// A decoded MIDI control-change message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlChange {
    pub channel: u8,
    pub controller: u8,
    pub value: u8,
}

impl ControlChange {
    pub const fn new(channel: u8, controller: u8, value: u8) -> Self {
        Self { channel, controller, value }
    }
}

//=== Shared Slots ========================================================

type Bindings = [Option<KnobBinding>; KNOB_COUNT];

#[derive(Debug, Default)]
struct SharedKnobs {
    slots: [AtomicU8; KNOB_COUNT],
}

//=== KnobWriter ==========================================================

/// Write half of the knob state, handed to the device event thread.
///
/// Cheap to clone. Every store is a single atomic byte write, so the
/// device callback never blocks and never waits on the frame thread.
#[derive(Debug, Clone)]
pub struct KnobWriter {
    shared: Arc<SharedKnobs>,
    bindings: Bindings,
}

impl KnobWriter {
    /// Stores `cc.value` into every knob bound to `(cc.channel, cc.controller)`.
    ///
    /// Returns true if at least one knob matched. Values above
    /// [`MAX_KNOB_VALUE`] are not valid 7-bit data and are dropped.
    pub fn handle(&self, cc: ControlChange) -> bool {
        if cc.value > MAX_KNOB_VALUE {
            warn!(target: "knobs", "Dropping out-of-range control change {:?}", cc);
            return false;
        }

        let mut matched = false;
        for (index, binding) in self.bindings.iter().enumerate() {
            let Some(binding) = binding else { continue };
            if binding.channel == cc.channel && binding.controller == cc.controller {
                self.shared.slots[index].store(cc.value, Ordering::Relaxed);
                matched = true;
            }
        }

        if matched {
            trace!(target: "knobs", "Stored {:?}", cc);
        }
        matched
    }
}

//=== KnobState ===========================================================

/// Per-frame view of the knob positions.
///
/// Owned by the frame thread. Call [`KnobState::update`] once per frame,
/// then read values with [`KnobState::knob`].
#[derive(Debug)]
pub struct KnobState {
    shared: Arc<SharedKnobs>,
    bindings: Bindings,
    snapshot: [u8; KNOB_COUNT],
}

impl KnobState {
    //--- Construction -----------------------------------------------------

    /// Creates zeroed knob state for the given bindings.
    ///
    /// Binding `i` drives knob `i`. Bindings beyond [`KNOB_COUNT`] are
    /// ignored.
    pub fn new(bindings: &[KnobBinding]) -> Self {
        if bindings.len() > KNOB_COUNT {
            warn!(
                target: "knobs",
                "{} knob bindings configured, only the first {} are used",
                bindings.len(),
                KNOB_COUNT
            );
        }

        let mut slots: Bindings = [None; KNOB_COUNT];
        for (slot, binding) in slots.iter_mut().zip(bindings) {
            *slot = Some(*binding);
        }

        Self {
            shared: Arc::new(SharedKnobs::default()),
            bindings: slots,
            snapshot: [0; KNOB_COUNT],
        }
    }

    /// Creates knob state from a loaded configuration.
    pub fn from_config(config: &KnobConfig) -> Self {
        Self::new(&config.knobs)
    }

    /// Returns a writer for the device event thread.
    pub fn writer(&self) -> KnobWriter {
        KnobWriter {
            shared: Arc::clone(&self.shared),
            bindings: self.bindings,
        }
    }

    //--- Frame Update -----------------------------------------------------

    /// Loads every slot into the frame snapshot. Never blocks.
    pub fn update(&mut self) {
        for (value, slot) in self.snapshot.iter_mut().zip(&self.shared.slots) {
            *value = slot.load(Ordering::Relaxed);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Snapshot value of knob `index` (0–127), or `None` if out of range.
    pub fn knob(&self, index: usize) -> Option<u8> {
        self.snapshot.get(index).copied()
    }

    /// All snapshot values.
    pub fn knobs(&self) -> [u8; KNOB_COUNT] {
        self.snapshot
    }

    /// Binding for knob `index`, if one is configured.
    pub fn binding(&self, index: usize) -> Option<KnobBinding> {
        self.bindings.get(index).copied().flatten()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
