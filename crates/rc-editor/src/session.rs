//! Remote services and request sequencing.
//!
//! The editor talks to two services: a shortest-route solver and a graph
//! store. Both are traits so the HTTP adapter (`rc-client`), the WASM
//! bridge, and tests can each supply their own.
//!
//! Every route and load request is stamped with a `Generation`. Only a
//! response carrying the latest generation is applied; anything older is
//! dropped. Topology edits also retire the current route generation, so a
//! route computed for an outdated graph never lands.

use crate::events::{ModelEvent, Notice};
use crate::input::InputProvider;
use crate::state::EditorState;
use rc_core::layout::circle_layout;
use rc_core::model::{
    Edge, Graph, GraphData, GraphSummary, Node, RouteRequest, RouteResult, RouteState,
    SaveGraphRequest, SaveReceipt,
};
use std::fmt;

/// Name used when the user does not give a graph one.
pub const DEFAULT_GRAPH_NAME: &str = "Custom graph";

// ─── Service traits ──────────────────────────────────────────────────────

/// Shortest-route solver.
#[allow(async_fn_in_trait)]
pub trait RouteService {
    /// Never fails: transport errors and error statuses come back as
    /// `RouteResult::empty()`.
    async fn request_route(&self, request: &RouteRequest) -> RouteResult;
}

/// Persistent graph storage.
#[allow(async_fn_in_trait)]
pub trait GraphStore {
    type Error: fmt::Display;

    /// Saved graphs, newest first. Empty on failure.
    async fn list_graphs(&self) -> Vec<GraphSummary>;

    /// `None` on any failure (unknown id included).
    async fn load_graph(&self, id: u64) -> Option<GraphData>;

    async fn save_graph(&self, request: &SaveGraphRequest) -> Result<SaveReceipt, Self::Error>;
}

// ─── Generations ─────────────────────────────────────────────────────────

/// Monotonic request stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Latest issued generation per request kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestGuard {
    route: u64,
    load: u64,
}

impl RequestGuard {
    pub(crate) fn bump_route(&mut self) -> Generation {
        self.route += 1;
        Generation(self.route)
    }

    pub(crate) fn bump_load(&mut self) -> Generation {
        self.load += 1;
        Generation(self.load)
    }

    pub fn is_current_route(&self, generation: Generation) -> bool {
        generation.0 == self.route
    }

    pub fn is_current_load(&self, generation: Generation) -> bool {
        generation.0 == self.load
    }
}

/// A route request ready to send, with the stamp its answer must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    pub generation: Generation,
    pub request: RouteRequest,
}

// ─── Synchronous halves ──────────────────────────────────────────────────

impl EditorState {
    /// Prepare a route request for the selected endpoints. Without both a
    /// start and an end this posts `Notice::SelectEndpoints` instead.
    pub fn begin_route(&mut self) -> Option<RouteTicket> {
        let endpoints = self
            .selection
            .start
            .zip(self.selection.end)
            .filter(|(s, e)| self.graph.contains(*s) && self.graph.contains(*e));
        let Some((start, end)) = endpoints else {
            self.notify(Notice::SelectEndpoints);
            return None;
        };
        let generation = self.guard.bump_route();
        Some(RouteTicket {
            generation,
            request: RouteRequest::new(&self.graph, start, end),
        })
    }

    /// Apply a route response. Returns `false` when the ticket is stale.
    pub fn finish_route(&mut self, generation: Generation, result: RouteResult) -> bool {
        if !self.guard.is_current_route(generation) {
            log::debug!("dropping stale route response (generation {generation})");
            return false;
        }
        let found = result.found();
        self.route = RouteState::new(result);
        self.push_event(ModelEvent::RouteAnswered);
        if !found {
            self.notify(Notice::RouteNotFound);
        }
        true
    }

    pub fn begin_load(&mut self) -> Generation {
        self.guard.bump_load()
    }

    /// Apply a load response. `None` (the store failed) posts
    /// `Notice::LoadFailed` and keeps the current graph.
    pub fn finish_load(&mut self, generation: Generation, data: Option<GraphData>) -> bool {
        if !self.guard.is_current_load(generation) {
            log::debug!("dropping stale load response (generation {generation})");
            return false;
        }
        match data {
            Some(data) => {
                self.load_graph_data(data);
                true
            }
            None => {
                self.notify(Notice::LoadFailed);
                false
            }
        }
    }

    /// Replace the graph with stored data. Positions are kept only when
    /// every node has finite coordinates; otherwise all nodes go on a
    /// circle.
    pub fn load_graph_data(&mut self, data: GraphData) {
        let GraphData { nodes, edges } = data;
        let positions: Option<Vec<(f64, f64)>> = nodes.iter().map(|n| n.position()).collect();
        let positions =
            positions.unwrap_or_else(|| circle_layout(nodes.len(), self.container_width()));

        let mut graph = Graph::new();
        for (record, (x, y)) in nodes.into_iter().zip(positions) {
            let name = record.name.unwrap_or_else(|| record.id.to_string());
            if !graph.add_node(Node::new(record.id, name, x, y)) {
                log::debug!("duplicate node {} in stored graph", record.id);
            }
        }
        graph.edges = edges
            .into_iter()
            .map(|e| Edge::new(e.a, e.b, e.weight))
            .collect();

        log::debug!(
            "loaded graph: {} nodes, {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );
        self.replace_graph(graph);
    }
}

// ─── Async flows ─────────────────────────────────────────────────────────

/// Request a route for the current endpoints and apply the answer.
/// Returns whether a response was applied.
pub async fn find_route<S: RouteService>(state: &mut EditorState, service: &S) -> bool {
    let Some(ticket) = state.begin_route() else {
        return false;
    };
    let result = service.request_route(&ticket.request).await;
    state.finish_route(ticket.generation, result)
}

pub async fn load_graph<S: GraphStore>(state: &mut EditorState, store: &S, id: u64) -> bool {
    let generation = state.begin_load();
    let data = store.load_graph(id).await;
    state.finish_load(generation, data)
}

/// List stored graphs and open the newest one, if any.
pub async fn open_latest<S: GraphStore>(state: &mut EditorState, store: &S) -> Vec<GraphSummary> {
    let graphs = store.list_graphs().await;
    if let Some(first) = graphs.first() {
        load_graph(state, store, first.id).await;
    }
    graphs
}

/// Ask the user for a graph name; blank or cancelled means
/// `DEFAULT_GRAPH_NAME`.
pub fn ask_graph_name(input: &mut dyn InputProvider) -> String {
    input
        .graph_name(DEFAULT_GRAPH_NAME)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_GRAPH_NAME.to_string())
}

/// Ask for a name and persist the current graph.
pub async fn save_graph<S: GraphStore>(
    state: &mut EditorState,
    store: &S,
    input: &mut dyn InputProvider,
) -> Option<SaveReceipt> {
    let name = ask_graph_name(input);
    let request = state.save_request(&name);
    match store.save_graph(&request).await {
        Ok(receipt) => {
            state.notify(Notice::Saved {
                name: receipt.name.clone(),
            });
            Some(receipt)
        }
        Err(err) => {
            log::warn!("saving graph {name:?} failed: {err}");
            state.notify(Notice::SaveFailed);
            None
        }
    }
}
