use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the flight route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a city name could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when both endpoints exist but no sequence of flights connects them.
    #[error("no path exists between {start} and {goal}")]
    NoPathExists { start: String, goal: String },

    /// Raised when a graph fails construction-time validation.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphDefect),

    /// Graph file could not be located at the resolved path.
    #[error("graph file not found at {path}")]
    GraphFileNotFound { path: PathBuf },

    /// Raised when a graph file is not valid JSON in a supported shape.
    #[error("failed to parse graph file {path}: {source}")]
    GraphParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Raised when a route summary is requested for a route without stops.
    #[error("route was empty")]
    EmptyRoute,

    /// Raised when two consecutive route stops are not adjacent in the graph.
    #[error("route leg {from} -> {to} is not an edge of the graph")]
    MissingLeg { from: String, to: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Structural problems detected while building a [`crate::Graph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphDefect {
    #[error("edge {from} - {to} has negative cost {cost}")]
    NegativeWeight { from: String, to: String, cost: f64 },

    #[error("edge {from} - {to} has a non-finite cost")]
    NonFiniteWeight { from: String, to: String },

    #[error("node {node} has an edge to itself")]
    SelfLoop { node: String },

    #[error("edge {from} - {to} declared with conflicting costs {first} and {second}")]
    ConflictingEdge {
        from: String,
        to: String,
        first: f64,
        second: f64,
    },

    #[error("edge {from} -> {to} has no matching edge {to} -> {from}")]
    MissingReverseEdge { from: String, to: String },

    #[error("edge {from} -> {to} costs {forward} but the reverse edge costs {backward}")]
    MismatchedReverseWeight {
        from: String,
        to: String,
        forward: f64,
        backward: f64,
    },

    /// The edge costs add up past the largest finite cost, so long routes could not be priced.
    #[error("edge costs sum to more than the largest representable cost")]
    CostOverflow,
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
