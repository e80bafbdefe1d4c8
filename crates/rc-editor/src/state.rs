//! Editor state and mutation engine.
//!
//! `EditorState` exclusively owns the graph, selection, route highlight,
//! canvas size, and layout anchor. Clicks flow through the mode's tool into
//! `GraphMutation`s, which `apply_mutation` commits one at a time. Each
//! committed change is also recorded as a `ModelEvent`.

use crate::commands::EditorCommand;
use crate::events::{ModelEvent, Notice};
use crate::input::{InputEvent, InputProvider};
use crate::session::RequestGuard;
use crate::tools::tool_for;
use rc_core::id::NodeId;
use rc_core::layout::{CanvasSize, LayoutAnchor};
use rc_core::model::{Edge, Graph, Mode, Node, RouteState, SaveGraphRequest, Selection};
use rc_core::EditorConfig;
use rc_render::{CanvasTheme, Scene, SceneInput, hit_test, paint_scene};

/// A single atomic change to the editor model.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphMutation {
    AddNode { node: Node },
    AddEdge { edge: Edge },
    SetPending(Option<NodeId>),
    SetStart(NodeId),
    SetEnd(NodeId),
}

#[derive(Debug)]
pub struct EditorState {
    pub graph: Graph,
    pub selection: Selection,
    pub route: RouteState,
    pub canvas: CanvasSize,
    pub config: EditorConfig,
    container_width: f64,
    next_seq: u64,
    weight_preset: Option<String>,
    anchor: LayoutAnchor,
    pub(crate) guard: RequestGuard,
    events: Vec<ModelEvent>,
}

impl EditorState {
    pub fn new(config: EditorConfig) -> Self {
        let container_width = config.container_width;
        Self {
            graph: Graph::new(),
            selection: Selection::default(),
            route: RouteState::default(),
            canvas: CanvasSize::for_container(container_width, &config),
            config,
            container_width,
            next_seq: 1,
            weight_preset: None,
            anchor: LayoutAnchor::default(),
            guard: RequestGuard::default(),
            events: Vec::new(),
        }
    }

    /// Sequence number the next interactively added node will get.
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Weight text used for new edges instead of asking the input provider.
    pub fn weight_preset(&self) -> Option<&str> {
        self.weight_preset.as_deref()
    }

    /// Set (or with blank text, clear) the weight preset.
    pub fn set_weight_preset(&mut self, text: &str) {
        let text = text.trim();
        self.weight_preset = (!text.is_empty()).then(|| text.to_string());
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Nearest node within the detection radius of `(x, y)`.
    pub fn hit(&self, x: f64, y: f64) -> Option<NodeId> {
        hit_test(&self.graph.nodes, x, y, self.config.detect_radius)
    }

    /// Route a pointer event through the current mode's tool. Returns
    /// whether anything changed.
    pub fn handle_input(&mut self, event: &InputEvent, input: &mut dyn InputProvider) -> bool {
        let (x, y) = event.position();
        if !(x.is_finite() && y.is_finite()) {
            log::debug!("ignoring pointer event at non-finite ({x}, {y})");
            return false;
        }
        let hit = self.hit(x, y);
        let tool = tool_for(self.selection.mode);
        let mutations = tool.handle(self, x, y, hit, input);
        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        changed
    }

    /// Shorthand for a canvas click.
    pub fn click(&mut self, x: f64, y: f64, input: &mut dyn InputProvider) -> bool {
        self.handle_input(&InputEvent::Click { x, y }, input)
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Commit one mutation. Rejected mutations leave the state untouched
    /// and return `false`.
    pub fn apply_mutation(&mut self, mutation: GraphMutation) -> bool {
        match mutation {
            GraphMutation::AddNode { node } => {
                let id = node.id;
                if self.graph.contains(id) {
                    log::debug!("node {id} already exists");
                    return false;
                }
                self.anchor.record(&node);
                self.graph.add_node(node);
                if let Some(n) = id.seq_number() {
                    self.next_seq = self.next_seq.max(n.saturating_add(1));
                }
                self.invalidate_route();
                self.events.push(ModelEvent::NodeAdded(id));
                true
            }
            GraphMutation::AddEdge { edge } => {
                let (a, b) = (edge.a, edge.b);
                if let Err(rejected) = self.graph.add_edge(edge) {
                    log::debug!("edge rejected: {rejected}");
                    return false;
                }
                self.invalidate_route();
                self.events.push(ModelEvent::EdgeAdded { a, b });
                self.auto_fit();
                true
            }
            GraphMutation::SetPending(pending) => {
                if self.selection.pending == pending {
                    return false;
                }
                self.selection.pending = pending;
                self.events.push(ModelEvent::SelectionChanged);
                true
            }
            GraphMutation::SetStart(id) => self.select(id, false),
            GraphMutation::SetEnd(id) => self.select(id, true),
        }
    }

    fn select(&mut self, id: NodeId, end: bool) -> bool {
        if !self.graph.contains(id) {
            log::debug!("cannot select unknown node {id}");
            return false;
        }
        let slot = if end {
            &mut self.selection.end
        } else {
            &mut self.selection.start
        };
        *slot = Some(id);
        self.events.push(ModelEvent::SelectionChanged);
        true
    }

    /// Drop the route highlight and retire any in-flight route request.
    pub(crate) fn invalidate_route(&mut self) {
        self.guard.bump_route();
        if !self.route.is_empty() {
            self.route.clear();
            self.events.push(ModelEvent::RouteCleared);
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn execute(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::SetMode(mode) => self.set_mode(mode),
            EditorCommand::Reset => self.reset(),
            EditorCommand::Resize { width } => self.resize(width),
            EditorCommand::SelectStart(id) => {
                self.select(id, false);
            }
            EditorCommand::SelectEnd(id) => {
                self.select(id, true);
            }
        }
    }

    /// Switch modes. The pending endpoint never survives a mode change.
    pub fn set_mode(&mut self, mode: Mode) {
        self.selection.mode = mode;
        self.selection.pending = None;
        self.events.push(ModelEvent::ModeChanged(mode));
    }

    pub fn reset(&mut self) {
        self.graph.clear();
        self.selection = Selection {
            mode: self.selection.mode,
            ..Selection::default()
        };
        self.route.clear();
        self.guard.bump_route();
        self.guard.bump_load();
        self.next_seq = 1;
        self.anchor.clear();
        self.events.push(ModelEvent::Reset);
        self.auto_fit();
    }

    pub fn resize(&mut self, container_width: f64) {
        self.container_width = container_width;
        self.auto_fit();
    }

    /// Re-run the normalizer over the original positions and store the
    /// result.
    pub fn auto_fit(&mut self) {
        let fitted = self
            .anchor
            .fit(&self.graph.nodes, self.container_width, &self.config);
        self.graph.nodes = fitted.nodes;
        self.canvas = fitted.canvas;
        self.events.push(ModelEvent::LayoutChanged(fitted.canvas));
    }

    /// Install a freshly loaded graph and take its positions as the new
    /// original frame.
    pub(crate) fn replace_graph(&mut self, graph: Graph) {
        self.next_seq = graph.next_seq();
        self.anchor = LayoutAnchor::snapshot(&graph.nodes);
        let ids = graph.ids_by_seq();
        self.graph = graph;
        self.selection = Selection {
            mode: self.selection.mode,
            pending: None,
            start: ids.first().copied(),
            end: ids.last().copied(),
        };
        self.invalidate_route();
        self.events.push(ModelEvent::GraphReplaced);
        self.events.push(ModelEvent::SelectionChanged);
        self.auto_fit();
    }

    // ─── Outputs ─────────────────────────────────────────────────────────

    /// Payload for persisting the current graph under `name`.
    pub fn save_request(&self, name: &str) -> SaveGraphRequest {
        SaveGraphRequest {
            name: name.to_string(),
            nodes: self.graph.nodes.clone(),
            edges: self.graph.edges.clone(),
        }
    }

    pub fn scene_input(&self) -> SceneInput<'_> {
        SceneInput {
            graph: &self.graph,
            selection: &self.selection,
            route: &self.route,
            canvas: self.canvas,
        }
    }

    pub fn paint(&self, theme: &CanvasTheme) -> Scene {
        paint_scene(self.scene_input(), theme, &self.config)
    }

    pub fn notify(&mut self, notice: Notice) {
        self.events.push(ModelEvent::Notice(notice));
    }

    pub(crate) fn push_event(&mut self, event: ModelEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
