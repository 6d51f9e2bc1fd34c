//! `cities` command: list every city in the loaded graph.

use anyhow::Result;

use flightroute_lib::Graph;

use crate::output::OutputFormat;

pub fn handle_cities_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    format.render_cities(graph)
}
