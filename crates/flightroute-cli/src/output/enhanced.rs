//! Colored renderer for the `rich` output format.

use flightroute_lib::{format_cost, Cost, DistanceReport, Graph, RouteStep, RouteSummary};

use crate::terminal::{format_with_separators, supports_unicode, ColorPalette};

/// Renderer for the rich output format with colored stop tags.
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    /// Create a new renderer with the given color palette.
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// Print a route summary.
    pub fn render_route(&self, summary: &RouteSummary) {
        for line in self.build_route_lines(summary) {
            println!("{line}");
        }
    }

    /// Print a distance report.
    pub fn render_distances(&self, report: &DistanceReport) {
        for line in self.build_distance_lines(report) {
            println!("{line}");
        }
    }

    /// Print every city with its number of direct flights.
    pub fn render_cities(&self, graph: &Graph) {
        let p = &self.palette;
        let cities = graph.all_nodes();
        println!("{} cities:", cities.len());
        for city in cities {
            let flights = graph.neighbours(city).map(|n| n.len()).unwrap_or(0);
            println!(
                "  {}{}{} {}({} direct){}",
                p.white_bold, city, p.reset, p.gray, flights, p.reset
            );
        }
    }

    pub(crate) fn build_route_lines(&self, summary: &RouteSummary) -> Vec<String> {
        let p = &self.palette;
        let arrow = if supports_unicode() { "→" } else { "->" };
        let mut lines = Vec::with_capacity(summary.steps.len() + 3);

        lines.push(format!(
            "Route {}{}{} {} {}{}{} ({} {}):",
            p.white_bold,
            summary.start,
            p.reset,
            arrow,
            p.white_bold,
            summary.goal,
            p.reset,
            summary.hops,
            if summary.hops == 1 { "flight" } else { "flights" }
        ));

        let width = summary
            .steps
            .iter()
            .map(|step| step.name.chars().count())
            .max()
            .unwrap_or(0);
        let last = summary.steps.len().saturating_sub(1);
        for (i, step) in summary.steps.iter().enumerate() {
            lines.push(self.build_step_line(step, i == 0, i == last, width));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total cost: {}{}{}",
            p.green,
            format_amount(summary.total_cost),
            p.reset
        ));
        lines
    }

    fn build_step_line(
        &self,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
        width: usize,
    ) -> String {
        let p = &self.palette;
        let (tag_color, tag_text) = self.step_tag(is_first, is_last);
        let mut line = format!(
            "{}{}{} {}{:<width$}{}",
            tag_color, tag_text, p.reset, p.white_bold, step.name, p.reset
        );
        if let Some(leg) = step.leg_cost {
            line.push_str(&format!(
                "  {}+{}{} {}(total {}){}",
                p.green,
                format_amount(leg),
                p.reset,
                p.gray,
                format_amount(step.cumulative_cost),
                p.reset
            ));
        }
        line.trim_end().to_string()
    }

    fn step_tag(&self, is_first: bool, is_last: bool) -> (&str, &str) {
        let p = &self.palette;
        if is_first {
            (p.tag_start, " STRT ")
        } else if is_last {
            (p.tag_goal, " GOAL ")
        } else {
            (p.tag_via, " VIA  ")
        }
    }

    pub(crate) fn build_distance_lines(&self, report: &DistanceReport) -> Vec<String> {
        let p = &self.palette;
        let mut lines = Vec::with_capacity(report.entries.len() + 1);
        lines.push(format!(
            "Costs from {}{}{} ({} reachable):",
            p.white_bold, report.start, p.reset, report.reachable
        ));

        let width = report
            .entries
            .iter()
            .map(|entry| entry.name.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &report.entries {
            let line = match entry.cost {
                Some(cost) => {
                    let via = entry
                        .via
                        .as_deref()
                        .map(|via| format!(" {}via {}{}", p.gray, via, p.reset))
                        .unwrap_or_default();
                    format!(
                        "  {:<width$}  {}{}{}{}",
                        entry.name,
                        p.green,
                        format_amount(cost),
                        p.reset,
                        via
                    )
                }
                None => format!(
                    "  {:<width$}  {}unreachable{}",
                    entry.name, p.gray, p.reset
                ),
            };
            lines.push(line);
        }
        lines
    }
}

/// Whole costs that fit in a `u64` get thousands separators; anything else
/// goes through [`format_cost`].
fn format_amount(cost: Cost) -> String {
    // `u64::MAX as f64` rounds up to 2^64, which would saturate the cast.
    if cost >= 0.0 && cost < u64::MAX as f64 && cost.fract() == 0.0 {
        format_with_separators(cost as u64)
    } else {
        format_cost(cost)
    }
}
