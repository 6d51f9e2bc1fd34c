//! Output formatting for route, distance and city listings.
//!
//! Each [`OutputFormat`] prints to stdout; diagnostics stay on stderr.

mod enhanced;

use anyhow::{Context, Result};
use clap::ValueEnum;

use flightroute_lib::{DistanceReport, Graph, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

pub use enhanced::EnhancedRenderer;

/// Output format for all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Route on one line followed by the total cost.
    #[default]
    Text,
    /// Colored itinerary with START/VIA/GOAL tags and per-leg costs.
    Rich,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Print a route summary in this format.
    pub fn render_route(self, summary: &RouteSummary) -> Result<()> {
        match self {
            OutputFormat::Text => {
                print!("{}", summary.render(RouteRenderMode::PlainText));
            }
            OutputFormat::Rich => {
                EnhancedRenderer::new(ColorPalette::detect()).render_route(summary);
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(summary)
                    .context("failed to serialise route summary")?;
                println!("{json}");
            }
        }
        Ok(())
    }

    /// Print every destination's cost from one start city.
    pub fn render_distances(self, report: &DistanceReport) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", report.render()),
            OutputFormat::Rich => {
                EnhancedRenderer::new(ColorPalette::detect()).render_distances(report);
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report)
                    .context("failed to serialise distance report")?;
                println!("{json}");
            }
        }
        Ok(())
    }

    /// Print the sorted city list.
    pub fn render_cities(self, graph: &Graph) -> Result<()> {
        let cities = graph.all_nodes();
        match self {
            OutputFormat::Text => {
                for city in &cities {
                    println!("{city}");
                }
            }
            OutputFormat::Rich => {
                EnhancedRenderer::new(ColorPalette::detect()).render_cities(graph);
            }
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&cities).context("failed to serialise cities")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
