//=========================================================================
// Frame
//=========================================================================
//
// Render target handle passed to Scene::draw by the windowed host.
//
// Carries the per-frame surface facts a renderer needs. The host does not
// rasterise anything itself.
//
//=========================================================================

/// Per-frame render target handed to scenes by the windowed host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Zero-based frame counter, advanced after every successful update.
    pub index: u64,

    /// Fixed logical surface size from `SceneManager::layout`.
    pub logical_size: (u32, u32),

    /// Physical window size in pixels.
    pub window_size: (u32, u32),

    /// OS scale factor of the window.
    pub scale_factor: f64,
}

impl Frame {
    /// Ratio between physical window size and logical surface size.
    ///
    /// Returns `(1.0, 1.0)` for a degenerate logical size.
    pub fn surface_scale(&self) -> (f64, f64) {
        let (lw, lh) = self.logical_size;
        let (ww, wh) = self.window_size;
        if lw == 0 || lh == 0 {
            return (1.0, 1.0);
        }
        (ww as f64 / lw as f64, wh as f64 / lh as f64)
    }
}
