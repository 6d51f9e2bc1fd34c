use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::error::{Error, GraphDefect, Result};

/// Cost of travelling along one edge (a flight price in the reference table).
pub type Cost = f64;

/// Neighbour name to edge cost, ordered by name.
pub type Neighbours = BTreeMap<String, Cost>;

/// Number of "did you mean" candidates attached to [`Error::UnknownNode`].
const MAX_SUGGESTIONS: usize = 3;

/// Jaro-Winkler similarity below which a name is not offered as a suggestion.
const MIN_SUGGESTION_SIMILARITY: f64 = 0.8;

/// Immutable, undirected weighted graph used by the path finder.
///
/// Every edge is stored in both directions with the same cost. Storage is
/// shared, so cloning a graph to hand it to another query is cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: Arc<BTreeMap<String, Neighbours>>,
}

impl Graph {
    /// Start building a graph edge by edge.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Build a graph from `(from, to, cost)` triples, each one a bidirectional edge.
    pub fn from_edges<I, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, Cost)>,
        S: Into<String>,
    {
        edges
            .into_iter()
            .fold(GraphBuilder::new(), |builder, (from, to, cost)| {
                builder.edge(from, to, cost)
            })
            .build()
    }

    /// Accept a fully spelled-out adjacency table.
    ///
    /// The table must already be symmetric: each `from -> to` entry needs a
    /// `to -> from` entry with the identical cost.
    pub fn from_adjacency(table: BTreeMap<String, Neighbours>) -> Result<Self> {
        for (from, neighbours) in &table {
            for (to, &cost) in neighbours {
                check_cost(from, to, cost)?;
                if from == to {
                    return Err(GraphDefect::SelfLoop { node: from.clone() }.into());
                }

                let backward = table
                    .get(to)
                    .and_then(|reverse| reverse.get(from))
                    .copied()
                    .ok_or_else(|| GraphDefect::MissingReverseEdge {
                        from: from.clone(),
                        to: to.clone(),
                    })?;
                if backward != cost {
                    return Err(GraphDefect::MismatchedReverseWeight {
                        from: from.clone(),
                        to: to.clone(),
                        forward: cost,
                        backward,
                    }
                    .into());
                }
            }
        }

        check_total_cost(&table)?;
        Ok(Self {
            adjacency: Arc::new(table),
        })
    }

    /// Return the neighbours of `node` with their edge costs.
    pub fn neighbours(&self, node: &str) -> Result<&Neighbours> {
        self.adjacency
            .get(node)
            .ok_or_else(|| unknown_node(node, self.node_names()))
    }

    /// All node names, sorted.
    pub fn all_nodes(&self) -> BTreeSet<&str> {
        self.node_names().collect()
    }

    /// Look up `name`, returning the stored node or an error with suggestions.
    pub fn resolve_node(&self, name: &str) -> Result<&str> {
        self.adjacency
            .get_key_value(name)
            .map(|(node, _)| node.as_str())
            .ok_or_else(|| unknown_node(name, self.node_names()))
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Cost of the direct edge between `from` and `to`, if there is one.
    pub fn edge_cost(&self, from: &str, to: &str) -> Option<Cost> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Iterate each undirected edge once, with `from` ordered before `to`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, Cost)> + '_ {
        self.adjacency.iter().flat_map(|(from, neighbours)| {
            neighbours
                .iter()
                .filter(move |(to, _)| from < *to)
                .map(move |(to, cost)| (from.as_str(), to.as_str(), *cost))
        })
    }

    /// Rank node names by case-insensitive similarity to `name`.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        rank_similar(name, self.node_names(), limit)
    }

    fn node_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }
}

/// Incremental constructor for [`Graph`]; validation happens in [`GraphBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: BTreeSet<String>,
    edges: Vec<(String, String, Cost)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node that may have no edges at all.
    #[must_use]
    pub fn node(mut self, name: impl Into<String>) -> Self {
        self.nodes.insert(name.into());
        self
    }

    /// Add a bidirectional edge.
    #[must_use]
    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>, cost: Cost) -> Self {
        self.edges.push((from.into(), to.into(), cost));
        self
    }

    pub fn build(self) -> Result<Graph> {
        let mut adjacency: BTreeMap<String, Neighbours> = self
            .nodes
            .into_iter()
            .map(|node| (node, Neighbours::new()))
            .collect();

        for (from, to, cost) in self.edges {
            check_cost(&from, &to, cost)?;
            if from == to {
                return Err(GraphDefect::SelfLoop { node: from }.into());
            }

            // Repeating an edge is fine as long as the cost agrees.
            let existing = adjacency.get(&from).and_then(|n| n.get(&to)).copied();
            if let Some(first) = existing {
                if first != cost {
                    return Err(GraphDefect::ConflictingEdge {
                        from,
                        to,
                        first,
                        second: cost,
                    }
                    .into());
                }
                continue;
            }

            adjacency
                .entry(from.clone())
                .or_default()
                .insert(to.clone(), cost);
            adjacency.entry(to).or_default().insert(from, cost);
        }

        check_total_cost(&adjacency)?;
        Ok(Graph {
            adjacency: Arc::new(adjacency),
        })
    }
}

fn check_cost(from: &str, to: &str, cost: Cost) -> std::result::Result<(), GraphDefect> {
    if !cost.is_finite() {
        return Err(GraphDefect::NonFiniteWeight {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    if cost < 0.0 {
        return Err(GraphDefect::NegativeWeight {
            from: from.to_string(),
            to: to.to_string(),
            cost,
        });
    }
    Ok(())
}

/// No route can cost more than every undirected edge added together, so a
/// finite total keeps every relaxation in `compute_distances` finite.
fn check_total_cost(
    adjacency: &BTreeMap<String, Neighbours>,
) -> std::result::Result<(), GraphDefect> {
    let total: Cost = adjacency
        .iter()
        .flat_map(|(from, neighbours)| {
            neighbours
                .iter()
                .filter(move |(to, _)| from < *to)
                .map(|(_, cost)| *cost)
        })
        .sum();
    if total.is_finite() {
        Ok(())
    } else {
        Err(GraphDefect::CostOverflow)
    }
}

pub(crate) fn unknown_node<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Error {
    Error::UnknownNode {
        name: name.to_string(),
        suggestions: rank_similar(name, candidates, MAX_SUGGESTIONS),
    }
}

fn rank_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= MIN_SUGGESTION_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
