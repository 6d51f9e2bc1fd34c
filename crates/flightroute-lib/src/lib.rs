//! Flight route library entry points.
//!
//! This crate exposes the immutable city graph, the least-cost path finder,
//! loaders for the built-in reference table and JSON graph files, and
//! serialisable route summaries. Higher-level consumers (the CLI) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;

pub use dataset::{
    load_graph, load_graph_file, reference_graph, resolve_graph_source, GraphSource,
    GRAPH_ENV_VAR, REFERENCE_ROUTES,
};
pub use error::{Error, GraphDefect, Result};
pub use graph::{Cost, Graph, GraphBuilder, Neighbours};
pub use output::{
    format_cost, DistanceEntry, DistanceReport, RouteRenderMode, RouteStep, RouteSummary,
};
pub use path::{
    compute_distances, reconstruct_path, shortest_path, DistanceMap, PredecessorMap, Route,
    ShortestPathTree,
};
