use super::{open, select_endpoints};
use anyhow::{Context, Result};
use rc_client::HttpClient;
use rc_editor::views::route_info_text;

pub async fn run(client: &HttpClient, graph: &str, from: &str, to: &str) -> Result<()> {
    let mut state = open(client, graph).await?;
    select_endpoints(&mut state, from, to)?;
    let Some(ticket) = state.begin_route() else {
        anyhow::bail!("no route endpoints selected");
    };
    let result = client
        .try_route(&ticket.request)
        .await
        .context("route request failed")?;
    state.finish_route(ticket.generation, result);
    println!("{}", route_info_text(&state.graph, state.route.result()));
    Ok(())
}
