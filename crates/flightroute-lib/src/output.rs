use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph};
use crate::path::{Route, ShortestPathTree};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Route on one line followed by the total cost.
    PlainText,
    /// One stop per line with leg and running costs.
    Itinerary,
}

/// Stop along a summarised route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub name: String,
    /// Cost of the flight into this stop; absent for the departure city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_cost: Option<Cost>,
    pub cumulative_cost: Cost,
}

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub total_cost: Cost,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`Route`] into a summary with per-leg costs looked up in `graph`.
    pub fn from_route(graph: &Graph, route: &Route) -> Result<Self> {
        let (Some(start), Some(goal)) = (route.start(), route.goal()) else {
            return Err(Error::EmptyRoute);
        };

        let mut steps = Vec::with_capacity(route.stops.len());
        steps.push(RouteStep {
            index: 0,
            name: start.to_string(),
            leg_cost: None,
            cumulative_cost: 0.0,
        });

        let mut cumulative = 0.0;
        for (index, (from, to)) in route.legs().enumerate() {
            let leg = graph
                .edge_cost(from, to)
                .ok_or_else(|| Error::MissingLeg {
                    from: from.to_string(),
                    to: to.to_string(),
                })?;
            cumulative += leg;
            steps.push(RouteStep {
                index: index + 1,
                name: to.to_string(),
                leg_cost: Some(leg),
                cumulative_cost: cumulative,
            });
        }

        Ok(Self {
            start: start.to_string(),
            goal: goal.to_string(),
            hops: route.hop_count(),
            total_cost: route.cost,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Itinerary => self.render_itinerary(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Shortest path from {} to {}:",
            self.start, self.goal
        );
        let joined = self
            .steps
            .iter()
            .map(|step| step.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        let _ = writeln!(buffer, "{joined}");
        let _ = writeln!(buffer, "Total cost: {}", format_cost(self.total_cost));
        buffer
    }

    fn render_itinerary(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} ({} {}):",
            self.start,
            self.goal,
            self.hops,
            if self.hops == 1 { "flight" } else { "flights" }
        );
        for step in &self.steps {
            match step.leg_cost {
                Some(leg) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} (+{}, total {})",
                        step.index,
                        step.name,
                        format_cost(leg),
                        format_cost(step.cumulative_cost)
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.name);
                }
            }
        }
        let _ = writeln!(buffer, "\nTotal cost: {}", format_cost(self.total_cost));
        buffer
    }
}

/// Cost from the start node to one destination.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceEntry {
    pub name: String,
    /// `None` when the node cannot be reached.
    pub cost: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

/// Every node's cost from one start node, cheapest first.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistanceReport {
    pub start: String,
    pub reachable: usize,
    pub entries: Vec<DistanceEntry>,
}

impl DistanceReport {
    pub fn from_tree(tree: &ShortestPathTree) -> Self {
        let mut entries: Vec<DistanceEntry> = tree
            .distances
            .iter()
            .map(|(name, cost)| DistanceEntry {
                name: name.clone(),
                cost: cost.is_finite().then_some(*cost),
                via: tree.predecessor(name).map(str::to_string),
            })
            .collect();

        // Unreachable entries sort last; names break ties.
        entries.sort_by(|a, b| {
            let a_cost = a.cost.unwrap_or(Cost::INFINITY);
            let b_cost = b.cost.unwrap_or(Cost::INFINITY);
            a_cost.total_cmp(&b_cost).then_with(|| a.name.cmp(&b.name))
        });

        Self {
            start: tree.start.clone(),
            reachable: tree.reachable_count(),
            entries,
        }
    }

    pub fn render(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "Costs from {}:", self.start);
        let width = self
            .entries
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &self.entries {
            let cost = format_cost(entry.cost.unwrap_or(Cost::INFINITY));
            match &entry.via {
                Some(via) => {
                    let _ = writeln!(buffer, " - {:<width$}  {} (via {})", entry.name, cost, via);
                }
                None => {
                    let _ = writeln!(buffer, " - {:<width$}  {}", entry.name, cost);
                }
            }
        }
        buffer
    }
}

/// Format a cost for display.
///
/// Whole numbers print without decimals (the reference table only has whole
/// prices), other values with two decimals, and infinity as `unreachable`.
pub fn format_cost(cost: Cost) -> String {
    if cost.is_infinite() {
        "unreachable".to_string()
    } else if cost.fract() == 0.0 {
        format!("{:.0}", cost)
    } else {
        format!("{:.2}", cost)
    }
}
