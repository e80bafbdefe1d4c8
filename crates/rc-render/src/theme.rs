//! Colors and stroke widths for the graph canvas.

/// Theme-dependent colors for the painter. Values are CSS color strings so
/// both the SVG and Canvas2D backends can use them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasTheme {
    pub edge: &'static str,
    pub edge_glow: &'static str,
    pub route_edge: &'static str,
    pub route_glow: &'static str,
    pub label_backdrop: &'static str,
    pub label_text: &'static str,
    pub route_label_text: &'static str,
    pub node_fill: &'static str,
    pub node_stroke: &'static str,
    pub node_text: &'static str,
    pub pending_ring: &'static str,
    pub start_ring: &'static str,
    pub end_ring: &'static str,
    pub font_family: &'static str,
    pub font_size: f64,
}

impl CanvasTheme {
    /// Default light theme.
    pub fn light() -> Self {
        Self {
            edge: "#94a3b8",
            edge_glow: "#cbd5e1",
            route_edge: "#2575fc",
            route_glow: "#a5b4fc",
            label_backdrop: "rgba(255,255,255,0.9)",
            label_text: "#334155",
            route_label_text: "#1e3a8a",
            node_fill: "#6a00f4",
            node_stroke: "#1e293b",
            node_text: "#0f172a",
            pending_ring: "#6366f1",
            start_ring: "#22c55e",
            end_ring: "#ef4444",
            font_family: "Poppins, system-ui, sans-serif",
            font_size: 12.0,
        }
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::light()
    }
}
