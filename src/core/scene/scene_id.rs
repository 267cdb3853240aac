//=========================================================================
// Scene Identifier
//=========================================================================
//
// Integer key for registered scenes.
//
// Non-negative values name scenes. Negative values are reserved for
// sentinels and are rejected by every SceneManager operation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== SceneId =============================================================

/// Unique identifier of a scene within a [`SceneManager`](super::SceneManager).
///
/// Negative values are reserved for internal use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(i32);

impl SceneId {
    /// Sentinel meaning "no scene".
    pub const NONE: SceneId = SceneId(-1);

    /// Wraps a raw identifier. Validity is checked by the manager, not here.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> i32 {
        self.0
    }

    /// True for identifiers that may name a scene (`>= 0`).
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl From<i32> for SceneId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
