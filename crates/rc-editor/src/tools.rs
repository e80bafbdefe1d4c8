//! Tool system for canvas clicks.
//!
//! Each interaction mode has a tool that translates a click (already
//! hit-tested) into `GraphMutation`s. Tools only read the state; the
//! `EditorState` applies whatever they return.
//!
//! | Mode         | Hit node                          | Empty canvas        |
//! |--------------|-----------------------------------|---------------------|
//! | Add Node     | new node (hit is ignored)         | new node            |
//! | Add Edge     | pick first / second endpoint      | no-op               |
//! | Select Start | start = hit                       | no-op               |
//! | Select End   | end = hit                         | no-op               |

use crate::input::InputProvider;
use crate::state::{EditorState, GraphMutation};
use rc_core::id::NodeId;
use rc_core::layout::snap_to_grid;
use rc_core::model::{Edge, Mode, Node, parse_weight};

/// Trait for tools that turn a click into mutations.
pub trait Tool {
    fn mode(&self) -> Mode;

    /// Handle a click at canvas `(x, y)`. `hit` is the nearest node within
    /// the detection radius.
    fn handle(
        &self,
        state: &EditorState,
        x: f64,
        y: f64,
        hit: Option<NodeId>,
        input: &mut dyn InputProvider,
    ) -> Vec<GraphMutation>;
}

/// The tool that interprets clicks in `mode`.
pub fn tool_for(mode: Mode) -> &'static dyn Tool {
    static ADD_NODE: AddNodeTool = AddNodeTool;
    static ADD_EDGE: AddEdgeTool = AddEdgeTool;
    static PICK_START: PickTool = PickTool { end: false };
    static PICK_END: PickTool = PickTool { end: true };
    match mode {
        Mode::AddNode => &ADD_NODE,
        Mode::AddEdge => &ADD_EDGE,
        Mode::SelectStart => &PICK_START,
        Mode::SelectEnd => &PICK_END,
    }
}

// ─── Add Node ────────────────────────────────────────────────────────────

/// Places a grid-snapped node. Never refuses a click, even on top of an
/// existing node.
pub struct AddNodeTool;

impl Tool for AddNodeTool {
    fn mode(&self) -> Mode {
        Mode::AddNode
    }

    fn handle(
        &self,
        state: &EditorState,
        x: f64,
        y: f64,
        _hit: Option<NodeId>,
        input: &mut dyn InputProvider,
    ) -> Vec<GraphMutation> {
        let seq = state.next_seq();
        let fallback = format!("N{seq}");
        let name = input
            .node_name(&fallback)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(fallback);
        let grid = state.config.grid_size;
        let node = Node::new(
            NodeId::from_seq(seq),
            name,
            snap_to_grid(x, grid),
            snap_to_grid(y, grid),
        );
        vec![GraphMutation::AddNode { node }]
    }
}

// ─── Add Edge ────────────────────────────────────────────────────────────

/// Two-click edge creation. The first hit becomes the pending endpoint;
/// the second hit completes the edge. Clicking the pending node again
/// cancels.
pub struct AddEdgeTool;

impl Tool for AddEdgeTool {
    fn mode(&self) -> Mode {
        Mode::AddEdge
    }

    fn handle(
        &self,
        state: &EditorState,
        _x: f64,
        _y: f64,
        hit: Option<NodeId>,
        input: &mut dyn InputProvider,
    ) -> Vec<GraphMutation> {
        let Some(hit) = hit else {
            return Vec::new();
        };
        match state.selection.pending {
            None => vec![GraphMutation::SetPending(Some(hit))],
            Some(first) if first == hit => {
                log::debug!("self-loop on {hit} ignored");
                vec![GraphMutation::SetPending(None)]
            }
            Some(first) => {
                let text = match state.weight_preset() {
                    Some(preset) => Some(preset.to_string()),
                    None => input.edge_weight(),
                };
                let weight = parse_weight(text.as_deref());
                vec![
                    GraphMutation::AddEdge {
                        edge: Edge::new(first, hit, weight),
                    },
                    GraphMutation::SetPending(None),
                ]
            }
        }
    }
}

// ─── Select Start / End ──────────────────────────────────────────────────

/// Marks the hit node as the route start (or end).
pub struct PickTool {
    end: bool,
}

impl Tool for PickTool {
    fn mode(&self) -> Mode {
        if self.end {
            Mode::SelectEnd
        } else {
            Mode::SelectStart
        }
    }

    fn handle(
        &self,
        _state: &EditorState,
        _x: f64,
        _y: f64,
        hit: Option<NodeId>,
        _input: &mut dyn InputProvider,
    ) -> Vec<GraphMutation> {
        match hit {
            Some(id) if self.end => vec![GraphMutation::SetEnd(id)],
            Some(id) => vec![GraphMutation::SetStart(id)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use pretty_assertions::assert_eq;
    use rc_core::EditorConfig;

    #[test]
    fn tools_report_their_mode() {
        for mode in Mode::ALL {
            assert_eq!(tool_for(mode).mode(), mode);
        }
    }

    #[test]
    fn add_node_snaps_and_names() {
        let state = EditorState::new(EditorConfig::default());
        let mut input = ScriptedInput::new().with_names(["  "]);
        let out = AddNodeTool.handle(&state, 151.0, 29.0, None, &mut input);
        let GraphMutation::AddNode { node } = &out[0] else {
            panic!("expected AddNode, got {out:?}");
        };
        assert_eq!(node.id.as_str(), "1");
        assert_eq!(node.name, "N1");
        assert_eq!((node.x, node.y), (180.0, 0.0));
    }

    #[test]
    fn add_edge_miss_is_noop() {
        let state = EditorState::new(EditorConfig::default());
        let out = AddEdgeTool.handle(&state, 0.0, 0.0, None, &mut ScriptedInput::new());
        assert!(out.is_empty());
    }

    #[test]
    fn add_edge_defaults_bad_weight() {
        let mut state = EditorState::new(EditorConfig::default());
        let a = NodeId::intern("1");
        let b = NodeId::intern("2");
        state.selection.pending = Some(a);
        let mut input = ScriptedInput::new().with_weights(["twelve"]);
        let out = AddEdgeTool.handle(&state, 0.0, 0.0, Some(b), &mut input);
        assert_eq!(
            out,
            vec![
                GraphMutation::AddEdge {
                    edge: Edge::new(a, b, 1.0)
                },
                GraphMutation::SetPending(None),
            ]
        );
    }

    #[test]
    fn weight_preset_skips_the_prompt() {
        let mut state = EditorState::new(EditorConfig::default());
        let a = NodeId::intern("1");
        let b = NodeId::intern("2");
        state.selection.pending = Some(a);
        state.set_weight_preset(" 42.5 ");
        let mut input = ScriptedInput::new().with_weights(["7"]);
        let out = AddEdgeTool.handle(&state, 0.0, 0.0, Some(b), &mut input);
        assert_eq!(
            out[0],
            GraphMutation::AddEdge {
                edge: Edge::new(a, b, 42.5)
            }
        );
        assert_eq!(input.edge_weight().as_deref(), Some("7"));
    }

    #[test]
    fn pick_ignores_empty_canvas() {
        let state = EditorState::new(EditorConfig::default());
        let tool = tool_for(Mode::SelectEnd);
        assert!(tool
            .handle(&state, 5.0, 5.0, None, &mut ScriptedInput::new())
            .is_empty());
    }
}
