//! Editor tuning constants.
//!
//! All distances are canvas units (CSS pixels in the browser front end).

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration shared by the state machine, normalizer, and renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// New nodes snap to multiples of this size. Default: **60**.
    pub grid_size: f64,

    /// Clicks within this distance of a node center hit the node.
    /// Deliberately larger than `node_radius`. Default: **24**.
    pub detect_radius: f64,

    /// Visual radius of a node marker. Default: **8**.
    pub node_radius: f64,

    /// Radius of the pending/start/end highlight rings. Default: **12**.
    pub ring_radius: f64,

    /// Empty border kept around the graph by auto-fit. Default: **40**.
    pub margin: f64,

    /// The canvas never shrinks below this height. Default: **520**.
    pub min_canvas_height: f64,

    /// Width of the hosting container before the front end reports one.
    /// Default: **800**.
    pub container_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 60.0,
            detect_radius: 24.0,
            node_radius: 8.0,
            ring_radius: 12.0,
            margin: 40.0,
            min_canvas_height: 520.0,
            container_width: 800.0,
        }
    }
}
