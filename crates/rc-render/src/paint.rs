//! Editor state → display list.
//!
//! `paint_scene` is a pure function of the graph, selection, and route
//! highlight. It emits backend-neutral `DrawCmd`s in paint order: clear,
//! edges with weight labels, nodes with names, then highlight rings on top.
//! Backends (SVG here, Canvas2D in the WASM bridge) only replay the list.

use kurbo::{Circle, Line, Point};
use rc_core::id::NodeId;
use rc_core::layout::CanvasSize;
use rc_core::model::{Graph, RouteState, Selection};
use rc_core::EditorConfig;
use smallvec::SmallVec;

use crate::theme::CanvasTheme;

/// Everything the painter reads. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub graph: &'a Graph,
    pub selection: &'a Selection,
    pub route: &'a RouteState,
    pub canvas: CanvasSize,
}

/// Horizontal anchoring of a text label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
}

/// Which selection a highlight ring marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    Pending,
    Start,
    End,
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole canvas.
    Clear { width: f64, height: f64 },
    /// An edge segment with a soft glow.
    Edge {
        a: NodeId,
        b: NodeId,
        line: Line,
        color: &'static str,
        width: f64,
        glow: &'static str,
        blur: f64,
        on_route: bool,
    },
    /// Text at a baseline anchor, optionally on a backdrop box.
    Label {
        anchor: Point,
        text: String,
        color: &'static str,
        align: TextAlign,
        font_size: f64,
        backdrop: Option<&'static str>,
    },
    /// A filled, outlined node marker.
    Node {
        id: NodeId,
        disc: Circle,
        fill: &'static str,
        stroke: &'static str,
        stroke_width: f64,
    },
    /// An unfilled ring around a selected node.
    Ring {
        id: NodeId,
        kind: RingKind,
        circle: Circle,
        color: &'static str,
        width: f64,
    },
}

/// A painted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    /// `(a, b, on_route)` for every drawn edge.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, bool)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Edge { a, b, on_route, .. } => Some((*a, *b, *on_route)),
            _ => None,
        })
    }

    pub fn rings(&self) -> impl Iterator<Item = (RingKind, NodeId)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Ring { kind, id, .. } => Some((*kind, *id)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCmd::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

const EDGE_WIDTH: f64 = 3.0;
const ROUTE_EDGE_WIDTH: f64 = 4.0;
const NODE_STROKE_WIDTH: f64 = 1.5;
const RING_WIDTH: f64 = 3.0;
const NAME_OFFSET: f64 = 10.0;

/// Paint the editor state into a fresh display list.
pub fn paint_scene(input: SceneInput<'_>, theme: &CanvasTheme, config: &EditorConfig) -> Scene {
    let SceneInput {
        graph,
        selection,
        route,
        canvas,
    } = input;
    let mut commands = Vec::with_capacity(1 + graph.edges.len() * 2 + graph.nodes.len() * 2 + 3);

    commands.push(DrawCmd::Clear {
        width: canvas.width,
        height: canvas.height,
    });

    // ─── Edges + weight labels ───────────────────────────────────────────
    for edge in &graph.edges {
        let Some((a, b)) = graph.endpoints(edge) else {
            log::trace!("skip dangling edge {}-{}", edge.a, edge.b);
            continue;
        };
        let on_route = route.contains_edge(edge.a, edge.b);
        let (p0, p1) = (Point::new(a.x, a.y), Point::new(b.x, b.y));

        commands.push(DrawCmd::Edge {
            a: edge.a,
            b: edge.b,
            line: Line::new(p0, p1),
            color: if on_route { theme.route_edge } else { theme.edge },
            width: if on_route { ROUTE_EDGE_WIDTH } else { EDGE_WIDTH },
            glow: if on_route { theme.route_glow } else { theme.edge_glow },
            blur: if on_route { 6.0 } else { 2.0 },
            on_route,
        });
        commands.push(DrawCmd::Label {
            anchor: p0.midpoint(p1),
            text: format!("{} m", edge.weight),
            color: if on_route {
                theme.route_label_text
            } else {
                theme.label_text
            },
            align: TextAlign::Center,
            font_size: theme.font_size,
            backdrop: Some(theme.label_backdrop),
        });
    }

    // ─── Nodes + names ───────────────────────────────────────────────────
    for node in &graph.nodes {
        let center = Point::new(node.x, node.y);
        commands.push(DrawCmd::Node {
            id: node.id,
            disc: Circle::new(center, config.node_radius),
            fill: theme.node_fill,
            stroke: theme.node_stroke,
            stroke_width: NODE_STROKE_WIDTH,
        });
        commands.push(DrawCmd::Label {
            anchor: Point::new(node.x + NAME_OFFSET, node.y - NAME_OFFSET),
            text: node.name.clone(),
            color: theme.node_text,
            align: TextAlign::Start,
            font_size: theme.font_size,
            backdrop: None,
        });
    }

    // ─── Highlight rings (on top) ────────────────────────────────────────
    let mut rings: SmallVec<[(RingKind, NodeId, &'static str); 3]> = SmallVec::new();
    if let Some(id) = selection.pending {
        rings.push((RingKind::Pending, id, theme.pending_ring));
    }
    if let Some(id) = selection.start {
        rings.push((RingKind::Start, id, theme.start_ring));
    }
    if let Some(id) = selection.end {
        rings.push((RingKind::End, id, theme.end_ring));
    }
    for (kind, id, color) in rings {
        if let Some(node) = graph.node(id) {
            commands.push(DrawCmd::Ring {
                id,
                kind,
                circle: Circle::new(Point::new(node.x, node.y), config.ring_radius),
                color,
                width: RING_WIDTH,
            });
        }
    }

    log::trace!(
        "painted {} nodes, {} edges ({} commands)",
        graph.nodes.len(),
        graph.edges.len(),
        commands.len()
    );

    Scene {
        width: canvas.width,
        height: canvas.height,
        commands,
    }
}
