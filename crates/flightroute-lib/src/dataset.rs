use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Cost, Graph, Neighbours};

/// Environment variable naming a JSON graph file to load instead of the reference table.
pub const GRAPH_ENV_VAR: &str = "FLIGHTROUTE_GRAPH";

/// Built-in table of undirected city-to-city flight costs.
pub const REFERENCE_ROUTES: &[(&str, &str, Cost)] = &[
    ("New York", "Chicago", 719.0),
    ("New York", "Toronto", 470.0),
    ("New York", "Boston", 215.0),
    ("New York", "Washington", 227.0),
    ("Chicago", "Denver", 1003.0),
    ("Chicago", "Toronto", 525.0),
    ("Toronto", "Boston", 550.0),
    ("Boston", "Washington", 442.0),
    ("Washington", "Miami", 923.0),
    ("Denver", "Phoenix", 853.0),
    ("Denver", "Dallas", 792.0),
    ("Dallas", "Phoenix", 887.0),
    ("Dallas", "Houston", 239.0),
    ("Houston", "Miami", 1187.0),
    ("Miami", "Atlanta", 661.0),
    ("Atlanta", "Phoenix", 1589.0),
    ("Phoenix", "Los Angeles", 373.0),
    ("Los Angeles", "San Francisco", 382.0),
    ("San Francisco", "Seattle", 808.0),
    ("Seattle", "Denver", 1306.0),
];

/// Where the flight graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    /// The built-in [`REFERENCE_ROUTES`] table.
    Reference,
    /// A JSON graph file on disk.
    File(PathBuf),
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphSource::Reference => f.write_str("built-in reference table"),
            GraphSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Pick the graph source: explicit path, then [`GRAPH_ENV_VAR`], then the reference table.
pub fn resolve_graph_source(override_path: Option<&Path>) -> GraphSource {
    if let Some(path) = override_path {
        return GraphSource::File(path.to_path_buf());
    }

    match env::var_os(GRAPH_ENV_VAR) {
        Some(value) if !value.is_empty() => {
            debug!(var = GRAPH_ENV_VAR, "graph file taken from environment");
            GraphSource::File(PathBuf::from(value))
        }
        _ => GraphSource::Reference,
    }
}

/// Load the graph described by `source`.
pub fn load_graph(source: &GraphSource) -> Result<Graph> {
    let graph = match source {
        GraphSource::Reference => reference_graph()?,
        GraphSource::File(path) => load_graph_file(path)?,
    };

    info!(
        source = %source,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded flight graph"
    );
    Ok(graph)
}

/// Build the graph for the built-in [`REFERENCE_ROUTES`] table.
pub fn reference_graph() -> Result<Graph> {
    Graph::from_edges(REFERENCE_ROUTES.iter().copied())
}

/// Read a JSON graph file.
///
/// Two shapes are accepted. An adjacency table, which must list every edge
/// in both directions:
///
/// ```json
/// { "New York": { "Boston": 215 }, "Boston": { "New York": 215 } }
/// ```
///
/// or an edge list, where each entry is one bidirectional edge:
///
/// ```json
/// { "edges": [ { "from": "New York", "to": "Boston", "cost": 215 } ] }
/// ```
pub fn load_graph_file(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::GraphFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let document = GraphDocument::parse(&contents).map_err(|source| Error::GraphParse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), shape = document.shape(), "parsed graph file");
    document.into_graph()
}

#[derive(Debug)]
enum GraphDocument {
    EdgeList(EdgeList),
    Adjacency(BTreeMap<String, Neighbours>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeList {
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeRecord {
    from: String,
    to: String,
    cost: Cost,
}

impl GraphDocument {
    /// A top-level `edges` array selects the edge-list shape; anything else
    /// must be an adjacency table. Deserialising into the one chosen shape
    /// keeps serde's field-level error messages.
    fn parse(contents: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        if value.get("edges").is_some_and(serde_json::Value::is_array) {
            serde_json::from_str(contents).map(GraphDocument::EdgeList)
        } else {
            serde_json::from_str(contents).map(GraphDocument::Adjacency)
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            GraphDocument::EdgeList(_) => "edge_list",
            GraphDocument::Adjacency(_) => "adjacency",
        }
    }

    fn into_graph(self) -> Result<Graph> {
        match self {
            GraphDocument::EdgeList(list) => Graph::from_edges(
                list.edges
                    .into_iter()
                    .map(|edge| (edge.from, edge.to, edge.cost)),
            ),
            GraphDocument::Adjacency(table) => Graph::from_adjacency(table),
        }
    }
}
