use super::read_graph_file;
use anyhow::{Context, Result};
use rc_client::HttpClient;
use rc_editor::session::ask_graph_name;
use rc_editor::{EditorState, GraphStore, ScriptedInput};
use std::path::Path;

pub async fn run(client: &HttpClient, file: &Path, name: Option<String>) -> Result<()> {
    let data = read_graph_file(file)?;
    let mut state = EditorState::default();
    state.load_graph_data(data);

    let mut input = ScriptedInput::new();
    if let Some(name) = name {
        input = input.with_graph_name(name);
    }
    let name = ask_graph_name(&mut input);
    let receipt = client
        .save_graph(&state.save_request(&name))
        .await
        .with_context(|| format!("failed to save {}", file.display()))?;
    println!(
        "Saved graph {} ({}): {} nodes, {} edges",
        receipt.id,
        receipt.name,
        state.graph.nodes.len(),
        state.graph.edges.len()
    );
    Ok(())
}
