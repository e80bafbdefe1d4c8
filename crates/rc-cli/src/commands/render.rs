use super::{open, select_endpoints};
use anyhow::{Context, Result};
use rc_client::HttpClient;
use rc_editor::session::find_route;
use rc_editor::EditorState;
use rc_render::{CanvasTheme, render_svg};
use std::path::Path;

pub async fn run(
    client: &HttpClient,
    graph: &str,
    endpoints: Option<(String, String)>,
    output: Option<&Path>,
) -> Result<()> {
    let mut state = open(client, graph).await?;
    if let Some((from, to)) = endpoints {
        select_endpoints(&mut state, &from, &to)?;
        if find_route(&mut state, client).await && !state.route.result().found() {
            log::warn!("no route from {from} to {to}; rendering without highlight");
        }
    }

    let svg = to_svg(&state);
    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn to_svg(state: &EditorState) -> String {
    let theme = CanvasTheme::light();
    render_svg(&state.paint(&theme), theme.font_family)
}
