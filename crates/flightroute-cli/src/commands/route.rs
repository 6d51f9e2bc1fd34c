//! `route` command: cheapest trip between two cities.

use anyhow::{Context, Result};
use tracing::debug;

use flightroute_lib::{shortest_path, Graph, RouteSummary};

use super::describe_failure;
use crate::output::OutputFormat;

/// Arguments for the `route` subcommand.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: String,
    pub to: String,
}

/// Compute and print the cheapest route.
pub fn handle_route_command(
    graph: &Graph,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let route = shortest_path(graph, &args.from, &args.to).map_err(describe_failure)?;
    debug!(hops = route.hop_count(), cost = route.cost, "route computed");

    let summary = RouteSummary::from_route(graph, &route)
        .context("failed to build route summary for display")?;
    format.render_route(&summary)
}
