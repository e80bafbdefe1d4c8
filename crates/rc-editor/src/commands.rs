//! UI commands: everything that is not a canvas click.
//!
//! Buttons and dropdowns in the page chrome translate to these. Every
//! command is applied synchronously by `EditorState::execute`.

use rc_core::id::NodeId;
use rc_core::model::Mode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorCommand {
    /// Switch click interpretation. Always clears the pending endpoint.
    SetMode(Mode),
    /// Drop the whole graph and restart the id sequence at 1.
    Reset,
    /// The hosting container changed width.
    Resize { width: f64 },
    /// Start node picked from a dropdown.
    SelectStart(NodeId),
    /// End node picked from a dropdown.
    SelectEnd(NodeId),
}
