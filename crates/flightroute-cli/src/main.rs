use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use flightroute_cli::commands::cities::handle_cities_command;
use flightroute_cli::commands::distances::handle_distances_command;
use flightroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use flightroute_cli::output::OutputFormat;
use flightroute_lib::{load_graph, resolve_graph_source};

#[derive(Parser, Debug)]
#[command(author, version, about = "Least-cost flight route planner")]
struct Cli {
    /// JSON graph file to load instead of the built-in city table.
    ///
    /// Falls back to the FLIGHTROUTE_GRAPH environment variable.
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest route between two cities.
    Route {
        /// Departure city.
        #[arg(long = "from")]
        from: String,
        /// Destination city.
        #[arg(long = "to")]
        to: String,
    },
    /// List every city in the graph.
    Cities,
    /// Show the cheapest cost from one city to every other city.
    Distances {
        /// Departure city.
        #[arg(long = "from")]
        from: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let source = resolve_graph_source(cli.graph.as_deref());
    let graph =
        load_graph(&source).with_context(|| format!("failed to load flight graph from {source}"))?;

    match cli.command {
        Command::Route { from, to } => {
            handle_route_command(&graph, cli.format, &RouteCommandArgs { from, to })
        }
        Command::Cities => handle_cities_command(&graph, cli.format),
        Command::Distances { from } => handle_distances_command(&graph, cli.format, &from),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
