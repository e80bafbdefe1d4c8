//! Route Canvas editor engine.
//!
//! `EditorState` is the single owner of the graph, selection, and route
//! highlight. Clicks go through the mode's `Tool`, which turns them into
//! `GraphMutation`s; the state applies those and records `ModelEvent`s for
//! the view layer to pick up.

pub mod commands;
pub mod events;
pub mod input;
pub mod session;
pub mod state;
pub mod tools;
pub mod views;

pub use commands::EditorCommand;
pub use events::{ModelEvent, Notice};
pub use input::{InputEvent, InputProvider, ScriptedInput};
pub use session::{Generation, GraphStore, RouteService, RouteTicket};
pub use state::{EditorState, GraphMutation};
pub use views::Views;
