//! `distances` command: cost from one city to every other city.

use anyhow::Result;

use flightroute_lib::{compute_distances, DistanceReport, Graph};

use super::describe_failure;
use crate::output::OutputFormat;

pub fn handle_distances_command(graph: &Graph, format: OutputFormat, from: &str) -> Result<()> {
    let tree = compute_distances(graph, from).map_err(describe_failure)?;
    let report = DistanceReport::from_tree(&tree);
    format.render_distances(&report)
}
