pub mod list;
pub mod render;
pub mod route;
pub mod save;

use anyhow::{Context, Result, bail};
use rc_client::HttpClient;
use rc_core::id::NodeId;
use rc_core::model::GraphData;
use rc_editor::{EditorCommand, EditorState};
use std::path::Path;

/// Where a graph comes from: the server's store or a local JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource<'a> {
    Stored(u64),
    File(&'a Path),
}

impl<'a> GraphSource<'a> {
    /// Bare integers are stored graph ids; anything else is a path.
    pub fn parse(arg: &'a str) -> Self {
        match arg.parse::<u64>() {
            Ok(id) => Self::Stored(id),
            Err(_) => Self::File(Path::new(arg)),
        }
    }
}

pub fn read_graph_file(path: &Path) -> Result<GraphData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not a graph JSON file", path.display()))
}

/// Load a graph into a fresh editor, laid out the same way the browser
/// front end would show it.
pub async fn open(client: &HttpClient, arg: &str) -> Result<EditorState> {
    let data = match GraphSource::parse(arg) {
        GraphSource::Stored(id) => client
            .try_load(id)
            .await
            .with_context(|| format!("failed to load graph {id}"))?,
        GraphSource::File(path) => read_graph_file(path)?,
    };
    let mut state = EditorState::default();
    state.load_graph_data(data);
    Ok(state)
}

/// Set the route endpoints, refusing ids the graph does not have.
pub fn select_endpoints(state: &mut EditorState, from: &str, to: &str) -> Result<()> {
    for id in [from, to] {
        if !state.graph.contains(NodeId::intern(id)) {
            bail!("graph has no node {id:?}");
        }
    }
    state.execute(EditorCommand::SelectStart(NodeId::intern(from)));
    state.execute(EditorCommand::SelectEnd(NodeId::intern(to)));
    Ok(())
}
