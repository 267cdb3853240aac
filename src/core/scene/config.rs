//=========================================================================
// Scene Manager Configuration
//=========================================================================
//
// Plain settings consumed by SceneManager::with_config.
//
// Usually filled in through EngineBuilder rather than by hand.
//
//=========================================================================

//=== Drain Policy ========================================================

/// How many completed loads `SceneManager::update` drains per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainPolicy {
    /// At most one load result per frame. Bounds per-frame latency when
    /// many scenes finish together.
    #[default]
    One,

    /// Every load result already available.
    All,
}

//=== SceneManagerConfig ==================================================

/// Settings for a [`SceneManager`](super::SceneManager).
///
/// # Default Values
///
/// - **Logical size**: 640x480
/// - **Drain policy**: [`DrainPolicy::One`]
/// - **Load channel capacity**: `Some(16)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneManagerConfig {
    /// Fixed logical render surface returned by `layout`.
    pub logical_size: (u32, u32),

    /// Per-frame drain behaviour.
    pub drain_policy: DrainPolicy,

    /// Capacity of the load-result channel. `None` is unbounded and
    /// `Some(0)` is a rendezvous channel (loader threads wait until the
    /// main thread takes their result).
    pub channel_capacity: Option<usize>,
}

impl SceneManagerConfig {
    /// Logical render size used when none is configured.
    pub const DEFAULT_LOGICAL_SIZE: (u32, u32) = (640, 480);

    /// Load-result channel capacity used when none is configured.
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;
}

impl Default for SceneManagerConfig {
    fn default() -> Self {
        Self {
            logical_size: Self::DEFAULT_LOGICAL_SIZE,
            drain_policy: DrainPolicy::default(),
            channel_capacity: Some(Self::DEFAULT_CHANNEL_CAPACITY),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
