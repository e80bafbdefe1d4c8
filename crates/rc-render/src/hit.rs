//! Hit testing: point → node lookup.
//!
//! Nodes are small discs, so the tester uses a detection radius that is
//! independent of (and larger than) the drawn radius.

use kurbo::Point;
use rc_core::id::NodeId;
use rc_core::model::Node;

/// Find the node nearest to `(px, py)` within `radius`.
///
/// Returns `None` if no node is close enough. A later node only wins with a
/// strictly smaller distance, so equal distances resolve to the first node
/// in insertion order.
pub fn hit_test(nodes: &[Node], px: f64, py: f64, radius: f64) -> Option<NodeId> {
    let probe = Point::new(px, py);
    let mut best: Option<(NodeId, f64)> = None;

    for node in nodes {
        let d = probe.distance(Point::new(node.x, node.y));
        if d.is_nan() || d > radius {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((node.id, d));
        }
    }

    best.map(|(id, _)| id)
}
