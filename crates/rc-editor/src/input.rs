//! Input abstraction layer.
//!
//! Pointer events arrive as `InputEvent`s in canvas coordinates. Text the
//! editor needs from the user (node names, edge weights, graph names) comes
//! through an injected `InputProvider`, so the state machine never blocks on
//! a UI prompt and tests can script the answers.

use rc_core::layout::CanvasSize;
use std::collections::VecDeque;

/// A normalized input event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary-button click on the canvas.
    Click { x: f64, y: f64 },
}

/// On-screen placement of the canvas element (e.g. `getBoundingClientRect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl InputEvent {
    /// Map a click in client (page) coordinates onto the canvas, undoing any
    /// CSS scaling between the element box and its backing size.
    pub fn from_client(client_x: f64, client_y: f64, rect: ClientRect, canvas: CanvasSize) -> Self {
        let scale_x = if rect.width > 0.0 { canvas.width / rect.width } else { 1.0 };
        let scale_y = if rect.height > 0.0 { canvas.height / rect.height } else { 1.0 };
        Self::Click {
            x: (client_x - rect.left) * scale_x,
            y: (client_y - rect.top) * scale_y,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match *self {
            Self::Click { x, y } => (x, y),
        }
    }
}

/// Supplies user-entered text on demand.
///
/// Returning `None` means "cancelled"; the editor then falls back to its
/// defaults (generated node label, weight 1, default graph name).
pub trait InputProvider {
    /// Name for a new node. `suggested` is the generated `N<seq>` label.
    fn node_name(&mut self, suggested: &str) -> Option<String>;

    /// Weight text for a new edge.
    fn edge_weight(&mut self) -> Option<String>;

    /// Name for a graph about to be saved.
    fn graph_name(&mut self, suggested: &str) -> Option<String>;
}

/// Pre-recorded answers, consumed in order. An exhausted queue answers
/// `None`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    names: VecDeque<String>,
    weights: VecDeque<String>,
    graph_names: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_weights<I, S>(mut self, weights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.weights.extend(weights.into_iter().map(Into::into));
        self
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_names.push_back(name.into());
        self
    }
}

impl InputProvider for ScriptedInput {
    fn node_name(&mut self, _suggested: &str) -> Option<String> {
        self.names.pop_front()
    }

    fn edge_weight(&mut self) -> Option<String> {
        self.weights.pop_front()
    }

    fn graph_name(&mut self, _suggested: &str) -> Option<String> {
        self.graph_names.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_coordinates_are_scaled() {
        let rect = ClientRect {
            left: 10.0,
            top: 20.0,
            width: 400.0,
            height: 260.0,
        };
        let canvas = CanvasSize {
            width: 800.0,
            height: 520.0,
        };
        let ev = InputEvent::from_client(110.0, 70.0, rect, canvas);
        assert_eq!(ev.position(), (200.0, 100.0));
    }

    #[test]
    fn scripted_input_runs_dry() {
        let mut input = ScriptedInput::new().with_names(["Gate"]).with_weights(["7"]);
        assert_eq!(input.node_name("N1").as_deref(), Some("Gate"));
        assert_eq!(input.node_name("N2"), None);
        assert_eq!(input.edge_weight().as_deref(), Some("7"));
        assert_eq!(input.edge_weight(), None);
        assert_eq!(input.graph_name("Custom graph"), None);
    }
}
