pub mod config;
pub mod id;
pub mod layout;
pub mod model;

pub use config::EditorConfig;
pub use id::NodeId;
pub use layout::{CanvasSize, LayoutAnchor, Normalized, circle_layout, normalize, snap_to_grid};
pub use model::*;
