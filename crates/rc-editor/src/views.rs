//! Read-only projections for the page chrome: node and edge tables, the
//! start/end dropdown options, the mode status line, route info text, and
//! queued notices.
//!
//! Projections are always recomputed from the canonical graph when a
//! relevant `ModelEvent` arrives; nothing is patched incrementally.

use crate::events::{ModelEvent, Notice};
use crate::state::EditorState;
use rc_core::id::NodeId;
use rc_core::model::{Graph, Mode, RouteResult, Selection};
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    pub id: NodeId,
    pub name: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// One entry of the start/end dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub id: NodeId,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct Views {
    pub nodes: Vec<NodeRow>,
    pub edges: Vec<EdgeRow>,
    pub options: Vec<SelectOption>,
    pub status: String,
    pub route_info: String,
    notices: VecDeque<Notice>,
}

impl Views {
    /// Full projection of the current state.
    pub fn new(state: &EditorState) -> Self {
        let mut views = Self::default();
        views.refresh_tables(&state.graph);
        views.status = status_text(&state.selection);
        views
    }

    /// Apply drained events. Returns whether anything visible changed.
    pub fn sync(&mut self, state: &EditorState, events: &[ModelEvent]) -> bool {
        if events.is_empty() {
            return false;
        }
        if events.iter().any(ModelEvent::touches_tables) {
            self.refresh_tables(&state.graph);
        }
        for event in events {
            match event {
                ModelEvent::RouteAnswered => {
                    self.route_info = route_info_text(&state.graph, state.route.result());
                }
                ModelEvent::RouteCleared | ModelEvent::Reset | ModelEvent::GraphReplaced => {
                    self.route_info.clear();
                }
                ModelEvent::Notice(notice) => self.notices.push_back(notice.clone()),
                _ => {}
            }
        }
        self.status = status_text(&state.selection);
        true
    }

    /// Oldest undelivered notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    fn refresh_tables(&mut self, graph: &Graph) {
        let ordered = graph.ids_by_seq();
        self.nodes = ordered
            .iter()
            .filter_map(|&id| graph.node(id))
            .map(|n| NodeRow {
                id: n.id,
                name: n.name.clone(),
                x: n.x.round() as i64,
                y: n.y.round() as i64,
            })
            .collect();
        self.options = ordered
            .iter()
            .filter_map(|&id| graph.node(id))
            .map(|n| SelectOption {
                id: n.id,
                label: format!("{} ({})", n.name, n.id),
            })
            .collect();
        self.edges = graph
            .edges
            .iter()
            .map(|e| EdgeRow {
                from: graph.name_of(e.a).to_string(),
                to: graph.name_of(e.b).to_string(),
                weight: e.weight,
            })
            .collect();
    }
}

pub fn status_text(selection: &Selection) -> String {
    let label = match selection.mode {
        Mode::AddNode => "Add Node",
        Mode::AddEdge if selection.pending.is_some() => "Add Edge (pick second node)",
        Mode::AddEdge => "Add Edge",
        Mode::SelectStart => "Select Start",
        Mode::SelectEnd => "Select End",
    };
    format!("Mode: {label}")
}

/// `Distance: 27 m | Route: Gate → Library`, or `Route not found`.
pub fn route_info_text(graph: &Graph, result: &RouteResult) -> String {
    let Some(total) = result.total else {
        return "Route not found".to_string();
    };
    let names: Vec<&str> = result.path.iter().map(|&id| graph.name_of(id)).collect();
    format!("Distance: {total} m | Route: {}", names.join(" → "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_follows_pending_endpoint() {
        let mut state = EditorState::default();
        let mut views = Views::new(&state);
        assert_eq!(views.status, "Mode: Add Node");

        state.click(60.0, 60.0, &mut ScriptedInput::new());
        state.set_mode(Mode::AddEdge);
        state.click(60.0, 60.0, &mut ScriptedInput::new());
        let events = state.drain_events();
        views.sync(&state, &events);
        assert_eq!(views.status, "Mode: Add Edge (pick second node)");
        assert_eq!(views.nodes.len(), 1);
        assert_eq!(views.options[0].label, "N1 (1)");
    }

    #[test]
    fn route_info_uses_names() {
        let mut state = EditorState::default();
        let mut input = ScriptedInput::new().with_names(["Gate", "Library"]);
        state.click(60.0, 60.0, &mut input);
        state.click(180.0, 60.0, &mut input);
        let result = RouteResult {
            path: vec![NodeId::intern("1"), NodeId::intern("2")],
            total: Some(27.0),
            edge_path: Vec::new(),
        };
        assert_eq!(
            route_info_text(&state.graph, &result),
            "Distance: 27 m | Route: Gate → Library"
        );
        assert_eq!(route_info_text(&state.graph, &RouteResult::empty()), "Route not found");
    }

    #[test]
    fn notices_queue_in_order() {
        let mut state = EditorState::default();
        let mut views = Views::new(&state);
        state.notify(Notice::LoadFailed);
        state.notify(Notice::SaveFailed);
        let events = state.drain_events();
        assert!(views.sync(&state, &events));
        assert_eq!(views.take_notice(), Some(Notice::LoadFailed));
        assert_eq!(views.take_notice(), Some(Notice::SaveFailed));
        assert_eq!(views.take_notice(), None);
    }
}
