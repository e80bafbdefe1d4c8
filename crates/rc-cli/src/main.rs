mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rc_client::{ClientConfig, HttpClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "route-canvas",
    about = "Inspect, route, and render weighted graphs stored on a Route Canvas server"
)]
struct Cli {
    /// Base URL of the routing/storage API
    #[arg(long, global = true, env = "ROUTE_CANVAS_URL")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List stored graphs, newest first
    List,
    /// Ask the server for the shortest route between two nodes
    Route {
        /// Stored graph id, or a path to a graph JSON file
        graph: String,
        /// Start node id
        #[arg(long)]
        from: String,
        /// End node id
        #[arg(long)]
        to: String,
    },
    /// Render a graph to SVG, optionally with a highlighted route
    Render {
        /// Stored graph id, or a path to a graph JSON file
        graph: String,
        #[arg(long, requires = "to")]
        from: Option<String>,
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a graph JSON file
    Save {
        file: PathBuf,
        /// Name to store the graph under
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(server) = cli.server {
        config = config.with_base_url(server);
    }
    let client = HttpClient::new(&config)?;
    log::debug!("using server {}", client.base_url());

    match cli.command {
        Command::List => commands::list::run(&client).await,
        Command::Route { graph, from, to } => {
            commands::route::run(&client, &graph, &from, &to).await
        }
        Command::Render {
            graph,
            from,
            to,
            output,
        } => {
            let endpoints = from.zip(to);
            commands::render::run(&client, &graph, endpoints, output.as_deref()).await
        }
        Command::Save { file, name } => commands::save::run(&client, &file, name).await,
    }
}
