//! Auto-fit layout: keeps the whole graph on the canvas with a margin.
//!
//! `normalize` is pure. It always works from the *original* positions held
//! by a [`LayoutAnchor`], so fitting twice never compounds a translation.

use crate::config::EditorConfig;
use crate::id::NodeId;
use crate::model::Node;
use std::collections::HashMap;

/// Canvas dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Plain resize for an empty graph: container width by minimum height.
    pub fn for_container(container_width: f64, config: &EditorConfig) -> Self {
        Self {
            width: container_width.floor().max(1.0),
            height: config.min_canvas_height,
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self::for_container(config.container_width, &config)
    }
}

/// Output of one auto-fit pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Input nodes translated so the bounding box starts at `(margin, margin)`.
    pub nodes: Vec<Node>,
    /// The translation that was applied.
    pub offset: (f64, f64),
    pub canvas: CanvasSize,
}

/// Snap a coordinate to the nearest multiple of `grid`.
pub fn snap_to_grid(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).round() * grid
}

/// Fit `originals` onto a canvas at least `container_width` wide.
pub fn normalize(originals: &[Node], container_width: f64, config: &EditorConfig) -> Normalized {
    let Some((min_x, min_y, max_x, max_y)) = bounding_box(originals) else {
        return Normalized {
            nodes: Vec::new(),
            offset: (0.0, 0.0),
            canvas: CanvasSize::for_container(container_width, config),
        };
    };

    let margin = config.margin;
    let needed_w = ((max_x - min_x) + margin * 2.0).ceil();
    let needed_h = ((max_y - min_y) + margin * 2.0).ceil();
    let canvas = CanvasSize {
        width: container_width.floor().max(needed_w),
        height: config.min_canvas_height.max(needed_h),
    };

    let dx = margin - min_x;
    let dy = margin - min_y;
    let nodes = originals
        .iter()
        .map(|n| Node {
            x: n.x + dx,
            y: n.y + dy,
            ..n.clone()
        })
        .collect();

    Normalized {
        nodes,
        offset: (dx, dy),
        canvas,
    }
}

/// `(min_x, min_y, max_x, max_y)` over all node centers.
fn bounding_box(nodes: &[Node]) -> Option<(f64, f64, f64, f64)> {
    let first = nodes.first()?;
    Some(nodes.iter().fold(
        (first.x, first.y, first.x, first.y),
        |(x0, y0, x1, y1), n| (x0.min(n.x), y0.min(n.y), x1.max(n.x), y1.max(n.y)),
    ))
}

/// Evenly spaced positions on a circle, used when loaded nodes carry no
/// usable coordinates. The radius grows with the node count.
pub fn circle_layout(count: usize, container_width: f64) -> Vec<(f64, f64)> {
    if count == 0 {
        return Vec::new();
    }
    let cx = (container_width / 2.0).floor().max(220.0);
    let cy = 260.0;
    let radius = (cx.min(cy) - 60.0).max(140.0) + (count as f64 * 2.0).floor().max(0.0);
    let step = std::f64::consts::TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = i as f64 * step;
            (cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

// ─── Anchor ──────────────────────────────────────────────────────────────

/// Original (pre-fit) node positions plus the translation currently shown.
///
/// Snapshot once per load, clear on reset. Nodes placed by clicking are
/// recorded in the same original frame by subtracting the current offset.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnchor {
    origins: HashMap<NodeId, (f64, f64)>,
    offset: (f64, f64),
}

impl LayoutAnchor {
    /// Take the given positions as the original frame.
    pub fn snapshot(nodes: &[Node]) -> Self {
        Self {
            origins: nodes.iter().map(|n| (n.id, (n.x, n.y))).collect(),
            offset: (0.0, 0.0),
        }
    }

    pub fn clear(&mut self) {
        self.origins.clear();
        self.offset = (0.0, 0.0);
    }

    /// Record a node placed at display coordinates.
    pub fn record(&mut self, node: &Node) {
        let (dx, dy) = self.offset;
        self.origins.insert(node.id, (node.x - dx, node.y - dy));
    }

    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    /// The nodes moved back to their original positions.
    pub fn originals(&self, nodes: &[Node]) -> Vec<Node> {
        let (dx, dy) = self.offset;
        nodes
            .iter()
            .map(|n| {
                let (x, y) = self
                    .origins
                    .get(&n.id)
                    .copied()
                    .unwrap_or((n.x - dx, n.y - dy));
                Node { x, y, ..n.clone() }
            })
            .collect()
    }

    /// Fit `nodes` (display positions) from their originals.
    pub fn fit(
        &mut self,
        nodes: &[Node],
        container_width: f64,
        config: &EditorConfig,
    ) -> Normalized {
        let result = normalize(&self.originals(nodes), container_width, config);
        self.offset = result.offset;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node::new(NodeId::intern(id), id, x, y)
    }

    #[test]
    fn snap_rounds_to_nearest_cell() {
        assert_eq!(snap_to_grid(29.0, 60.0), 0.0);
        assert_eq!(snap_to_grid(31.0, 60.0), 60.0);
        assert_eq!(snap_to_grid(151.0, 60.0), 180.0);
    }

    #[test]
    fn empty_graph_is_plain_resize() {
        let cfg = EditorConfig::default();
        let out = normalize(&[], 640.7, &cfg);
        assert!(out.nodes.is_empty());
        assert_eq!(
            out.canvas,
            CanvasSize {
                width: 640.0,
                height: 520.0
            }
        );
    }

    #[test]
    fn translates_bbox_to_margin() {
        let cfg = EditorConfig::default();
        let out = normalize(&[node("1", 120.0, 300.0), node("2", 1300.0, 900.0)], 800.0, &cfg);
        assert_eq!((out.nodes[0].x, out.nodes[0].y), (40.0, 40.0));
        assert_eq!((out.nodes[1].x, out.nodes[1].y), (1220.0, 640.0));
        assert_eq!(out.canvas.width, 1260.0);
        assert_eq!(out.canvas.height, 680.0);
    }

    #[test]
    fn anchor_fit_is_idempotent() {
        let cfg = EditorConfig::default();
        let placed = vec![node("1", 300.0, 240.0), node("2", 480.0, 360.0)];
        let mut anchor = LayoutAnchor::snapshot(&placed);
        let first = anchor.fit(&placed, 800.0, &cfg);
        let second = anchor.fit(&first.nodes, 800.0, &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn recorded_nodes_share_the_original_frame() {
        let cfg = EditorConfig::default();
        let mut anchor = LayoutAnchor::snapshot(&[node("1", 200.0, 200.0)]);
        let fitted = anchor.fit(&[node("1", 200.0, 200.0)], 800.0, &cfg);
        assert_eq!(anchor.offset(), (-160.0, -160.0));

        // Clicked at display (100, 40) → original (260, 200).
        let mut shown = fitted.nodes.clone();
        let clicked = node("2", 100.0, 40.0);
        anchor.record(&clicked);
        shown.push(clicked);
        let refit = anchor.fit(&shown, 800.0, &cfg);
        assert_eq!((refit.nodes[0].x, refit.nodes[0].y), (40.0, 40.0));
        assert_eq!((refit.nodes[1].x, refit.nodes[1].y), (100.0, 40.0));
    }

    #[test]
    fn circle_layout_grows_with_count() {
        let pts = circle_layout(4, 800.0);
        assert_eq!(pts.len(), 4);
        // cx = 400, cy = 260, r = max(140, 200) + 8 = 208
        assert!((pts[0].0 - 608.0).abs() < 1e-9);
        assert!((pts[0].1 - 260.0).abs() < 1e-9);
        assert!((pts[1].1 - 468.0).abs() < 1e-9);
        assert!(circle_layout(0, 800.0).is_empty());
    }
}
