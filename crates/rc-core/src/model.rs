//! Core graph data model for the route editor.
//!
//! The graph is undirected and weighted. Nodes keep insertion order (which is
//! also the hit-test tie-break order); edges keep insertion order for table
//! display. Edges are immutable once created.
//!
//! The wire records at the bottom of this module are the JSON shapes spoken
//! to the routing and storage services.

use crate::id::NodeId;
use petgraph::graphmap::UnGraphMap;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ─── Nodes & Edges ───────────────────────────────────────────────────────

/// A named point on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display label. May duplicate across nodes.
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// Replace a non-finite weight with the default of `1`.
pub fn coerce_weight(weight: f64) -> f64 {
    if weight.is_finite() { weight } else { default_weight() }
}

/// Parse user-entered weight text. Anything that is not a finite number
/// (empty, garbage, `inf`, `NaN`, cancelled prompt) becomes `1`.
pub fn parse_weight(input: Option<&str>) -> f64 {
    input
        .and_then(|s| s.trim().parse::<f64>().ok())
        .map(coerce_weight)
        .unwrap_or_else(default_weight)
}

/// Stored weights arrive as numbers, numeric strings, or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn deserialize_weight<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match RawWeight::deserialize(deserializer)? {
        RawWeight::Number(w) => coerce_weight(w),
        RawWeight::Text(s) => parse_weight(Some(&s)),
        RawWeight::Other(_) => default_weight(),
    })
}

/// An undirected weighted connection. `(a, b)` and `(b, a)` are the same edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    #[serde(alias = "w", default = "default_weight", deserialize_with = "deserialize_weight")]
    pub weight: f64,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId, weight: f64) -> Self {
        Self {
            a,
            b,
            weight: coerce_weight(weight),
        }
    }

    /// Undirected endpoint match.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

/// Why an edge insertion was refused. Rejections are silent to the user;
/// callers log them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRejected {
    SelfLoop(NodeId),
    MissingEndpoint(NodeId),
    Duplicate { a: NodeId, b: NodeId },
}

impl fmt::Display for EdgeRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop(id) => write!(f, "self-loop on node {id}"),
            Self::MissingEndpoint(id) => write!(f, "endpoint {id} does not exist"),
            Self::Duplicate { a, b } => write!(f, "edge {a}-{b} already exists"),
        }
    }
}

impl std::error::Error for EdgeRejected {}

// ─── Graph ───────────────────────────────────────────────────────────────

/// The canonical node and edge sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from storage. Edges are kept verbatim, including ones whose
    /// endpoints are missing; the renderer skips those.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Display name for an id, falling back to the id itself.
    pub fn name_of(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.name.as_str()).unwrap_or(id.as_str())
    }

    /// Append a node. Returns `false` (and leaves the graph untouched) when
    /// the id is already taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.contains(node.id) {
            log::debug!("node {} already exists, ignoring", node.id);
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Append an edge after validating it against the node set.
    pub fn add_edge(&mut self, edge: Edge) -> Result<&Edge, EdgeRejected> {
        if edge.is_self_loop() {
            return Err(EdgeRejected::SelfLoop(edge.a));
        }
        for end in [edge.a, edge.b] {
            if !self.contains(end) {
                return Err(EdgeRejected::MissingEndpoint(end));
            }
        }
        if self.has_edge(edge.a, edge.b) {
            return Err(EdgeRejected::Duplicate {
                a: edge.a,
                b: edge.b,
            });
        }
        self.edges.push(edge);
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Both endpoint nodes, or `None` when either is dangling.
    pub fn endpoints(&self, edge: &Edge) -> Option<(&Node, &Node)> {
        Some((self.node(edge.a)?, self.node(edge.b)?))
    }

    /// Next value for the node id sequence: one past the largest numeric
    /// part of any existing id, or 1 for a graph without numeric ids.
    pub fn next_seq(&self) -> u64 {
        self.nodes
            .iter()
            .filter_map(|n| n.id.seq_number())
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Node ids ordered by their numeric part. Ids without digits sort
    /// first; ties keep insertion order.
    pub fn ids_by_seq(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().map(|n| n.id).collect();
        ids.sort_by_key(|id| id.seq_number().unwrap_or(0));
        ids
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

// ─── Selection ───────────────────────────────────────────────────────────

/// How a canvas click is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    AddNode,
    AddEdge,
    SelectStart,
    SelectEnd,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::AddNode,
        Mode::AddEdge,
        Mode::SelectStart,
        Mode::SelectEnd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::AddNode => "add-node",
            Mode::AddEdge => "add-edge",
            Mode::SelectStart => "select-start",
            Mode::SelectEnd => "select-end",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// Editing mode plus the node picks that feed the renderer's rings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub mode: Mode,
    /// First endpoint of an edge under construction. Never holds two.
    pub pending: Option<NodeId>,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
}

// ─── Routes ──────────────────────────────────────────────────────────────

/// One hop of a returned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub a: NodeId,
    pub b: NodeId,
}

/// Shortest-route answer from the routing service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    #[serde(default)]
    pub path: Vec<NodeId>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub edge_path: Vec<RouteStep>,
}

impl RouteResult {
    /// "No route". Every failed request degrades to this.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn found(&self) -> bool {
        self.total.is_some()
    }
}

/// The highlighted route, indexed for symmetric edge membership.
#[derive(Debug, Clone, Default)]
pub struct RouteState {
    result: RouteResult,
    steps: UnGraphMap<NodeId, ()>,
}

impl RouteState {
    pub fn new(result: RouteResult) -> Self {
        let mut steps = UnGraphMap::new();
        for step in &result.edge_path {
            steps.add_edge(step.a, step.b, ());
        }
        Self { result, steps }
    }

    /// True when `(a, b)` or `(b, a)` is a step of the route.
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.steps.contains_edge(a, b)
    }

    pub fn result(&self) -> &RouteResult {
        &self.result
    }

    pub fn is_empty(&self) -> bool {
        self.result.path.is_empty() && self.result.edge_path.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ─── Wire records ────────────────────────────────────────────────────────

/// A node as returned by storage. Coordinates may be missing or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl NodeRecord {
    /// Both coordinates present and finite.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            name: Some(node.name.clone()),
            x: Some(node.x),
            y: Some(node.y),
        }
    }
}

/// `GET /graphs/{id}` response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// One entry of `GET /graphs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
}

/// `POST /route` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<Edge>,
    pub start_id: NodeId,
    pub end_id: NodeId,
}

impl RouteRequest {
    pub fn new(graph: &Graph, start_id: NodeId, end_id: NodeId) -> Self {
        Self {
            nodes: graph.nodes.iter().map(|n| n.id).collect(),
            edges: graph.edges.clone(),
            start_id,
            end_id,
        }
    }
}

/// `POST /graphs` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGraphRequest {
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// `POST /graphs` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    fn two_nodes() -> Graph {
        let mut g = Graph::new();
        g.add_node(Node::new(id("1"), "A", 0.0, 0.0));
        g.add_node(Node::new(id("2"), "B", 100.0, 0.0));
        g
    }

    #[test]
    fn weight_parsing_defaults_to_one() {
        assert_eq!(parse_weight(Some("50")), 50.0);
        assert_eq!(parse_weight(Some(" 2.5 ")), 2.5);
        assert_eq!(parse_weight(Some("abc")), 1.0);
        assert_eq!(parse_weight(Some("")), 1.0);
        assert_eq!(parse_weight(Some("inf")), 1.0);
        assert_eq!(parse_weight(None), 1.0);
        assert_eq!(Edge::new(id("1"), id("2"), f64::NAN).weight, 1.0);
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut g = two_nodes();
        let err = g.add_edge(Edge::new(id("1"), id("1"), 3.0)).unwrap_err();
        assert_eq!(err, EdgeRejected::SelfLoop(id("1")));
        assert!(g.edges.is_empty());
    }

    #[test]
    fn missing_endpoint_is_rejected() {
        let mut g = two_nodes();
        let err = g.add_edge(Edge::new(id("1"), id("99"), 3.0)).unwrap_err();
        assert_eq!(err, EdgeRejected::MissingEndpoint(id("99")));
    }

    #[test]
    fn reversed_duplicate_is_rejected() {
        let mut g = two_nodes();
        g.add_edge(Edge::new(id("1"), id("2"), 3.0)).unwrap();
        assert!(g.add_edge(Edge::new(id("2"), id("1"), 4.0)).is_err());
        assert_eq!(g.edges.len(), 1);
    }

    #[test]
    fn next_seq_follows_largest_numeric_id() {
        let mut g = Graph::new();
        assert_eq!(g.next_seq(), 1);
        g.add_node(Node::new(id("T3"), "T3", 0.0, 0.0));
        g.add_node(Node::new(id("T12"), "T12", 0.0, 0.0));
        g.add_node(Node::new(id("hub"), "hub", 0.0, 0.0));
        assert_eq!(g.next_seq(), 13);
    }

    #[test]
    fn route_membership_is_symmetric() {
        let route = RouteState::new(RouteResult {
            path: vec![id("1"), id("2")],
            total: Some(50.0),
            edge_path: vec![RouteStep { a: id("1"), b: id("2") }],
        });
        assert!(route.contains_edge(id("1"), id("2")));
        assert!(route.contains_edge(id("2"), id("1")));
        assert!(!route.contains_edge(id("1"), id("3")));
    }

    #[test]
    fn route_result_wire_shape() {
        let json = r#"{"path":["1","2"],"total":null,"edgePath":[{"a":"1","b":"2"}]}"#;
        let result: RouteResult = serde_json::from_str(json).unwrap();
        assert!(!result.found());
        assert_eq!(result.edge_path.len(), 1);
    }

    #[test]
    fn edge_accepts_short_weight_key() {
        let edge: Edge = serde_json::from_str(r#"{"a":"1","b":"2","w":40}"#).unwrap();
        assert_eq!(edge.weight, 40.0);
        let edge: Edge = serde_json::from_str(r#"{"a":"1","b":"2"}"#).unwrap();
        assert_eq!(edge.weight, 1.0);
    }

    #[test]
    fn mode_names_roundtrip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_name("drag"), None);
    }
}
