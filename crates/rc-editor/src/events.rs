//! Model-changed events.
//!
//! The state machine never touches view elements. It appends events to an
//! outbox; the view layer drains them and re-projects from the canonical
//! graph (see `views`).

use rc_core::id::NodeId;
use rc_core::layout::CanvasSize;
use rc_core::model::Mode;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    NodeAdded(NodeId),
    EdgeAdded { a: NodeId, b: NodeId },
    /// Node positions moved (auto-fit) or the canvas changed size.
    LayoutChanged(CanvasSize),
    /// A whole graph was loaded from storage.
    GraphReplaced,
    Reset,
    ModeChanged(Mode),
    /// Pending endpoint, start, or end changed.
    SelectionChanged,
    /// A route response was applied (found or not).
    RouteAnswered,
    /// The highlight was dropped because the graph changed.
    RouteCleared,
    Notice(Notice),
}

impl ModelEvent {
    /// Whether node or edge tables need re-projection.
    pub fn touches_tables(&self) -> bool {
        matches!(
            self,
            Self::NodeAdded(_)
                | Self::EdgeAdded { .. }
                | Self::LayoutChanged(_)
                | Self::GraphReplaced
                | Self::Reset
        )
    }
}

/// A passive, user-visible message. Nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A route was requested without both endpoints chosen.
    SelectEndpoints,
    RouteNotFound,
    LoadFailed,
    Saved { name: String },
    SaveFailed,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::SelectEndpoints => "Select a start and an end node".to_string(),
            Self::RouteNotFound => "Route not found".to_string(),
            Self::LoadFailed => "Failed to load graph".to_string(),
            Self::Saved { name } => format!("Graph \"{name}\" saved"),
            Self::SaveFailed => "Failed to save graph".to_string(),
        }
    }
}
