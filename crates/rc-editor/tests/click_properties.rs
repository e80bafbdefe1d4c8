//! Integration tests: property checks over random click sequences
//! (rc-editor).

use proptest::prelude::*;
use rc_core::model::Mode;
use rc_editor::{EditorCommand, EditorState, ModelEvent, ScriptedInput};
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Node(f64, f64),
    /// Click node `i` then node `j` (indices wrap) in Add Edge mode.
    Edge(usize, usize),
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0.0..1500.0f64, 0.0..1000.0f64).prop_map(|(x, y)| Op::Node(x, y)),
        4 => (0usize..8, 0usize..8).prop_map(|(i, j)| Op::Edge(i, j)),
        1 => Just(Op::Reset),
    ]
}

proptest! {
    #[test]
    fn editing_preserves_graph_invariants(ops in prop::collection::vec(op(), 1..40)) {
        let mut state = EditorState::default();
        let margin = state.config.margin;
        let mut last_seq = 0u64;

        for op in ops {
            match op {
                Op::Node(x, y) => {
                    state.set_mode(Mode::AddNode);
                    state.click(x, y, &mut ScriptedInput::new());
                }
                Op::Edge(i, j) => {
                    if state.graph.nodes.is_empty() {
                        continue;
                    }
                    let n = state.graph.nodes.len();
                    let (a, b) = (&state.graph.nodes[i % n], &state.graph.nodes[j % n]);
                    let (ax, ay, bx, by) = (a.x, a.y, b.x, b.y);
                    let edges_before = state.graph.edges.len();
                    state.set_mode(Mode::AddEdge);
                    state.click(ax, ay, &mut ScriptedInput::new());
                    state.click(bx, by, &mut ScriptedInput::new().with_weights(["3"]));
                    prop_assert_eq!(state.selection.pending, None);
                    if state.graph.edges.len() > edges_before {
                        for node in &state.graph.nodes {
                            prop_assert!(node.x >= margin - 1e-6 && node.y >= margin - 1e-6);
                        }
                    }
                }
                Op::Reset => {
                    state.execute(EditorCommand::Reset);
                    last_seq = 0;
                }
            }

            for event in state.drain_events() {
                if let ModelEvent::NodeAdded(id) = event {
                    let seq = id.seq_number().unwrap();
                    prop_assert!(seq > last_seq, "id {} after {}", seq, last_seq);
                    last_seq = seq;
                }
            }

            let mut pairs = HashSet::new();
            for edge in &state.graph.edges {
                prop_assert!(!edge.is_self_loop());
                prop_assert!(state.graph.contains(edge.a) && state.graph.contains(edge.b));
                let key = if edge.a <= edge.b { (edge.a, edge.b) } else { (edge.b, edge.a) };
                prop_assert!(pairs.insert(key), "duplicate edge {:?}", key);
            }
        }
    }

    #[test]
    fn auto_fit_twice_changes_nothing(
        points in prop::collection::vec((0.0..2000.0f64, 0.0..2000.0f64), 1..12)
    ) {
        let mut state = EditorState::default();
        for (x, y) in points {
            state.click(x, y, &mut ScriptedInput::new());
        }
        state.auto_fit();
        let once: Vec<(f64, f64)> = state.graph.nodes.iter().map(|n| (n.x, n.y)).collect();
        let canvas = state.canvas;
        state.auto_fit();
        let twice: Vec<(f64, f64)> = state.graph.nodes.iter().map(|n| (n.x, n.y)).collect();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(canvas, state.canvas);
    }
}
