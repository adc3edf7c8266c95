//! Weighted directed graph for the random-surfer walk.
//!
//! The graph is static for a session: loaded or built once, validated at
//! construction, and never mutated afterwards. Edge declaration order is
//! significant — the walker resolves transitions by scanning outgoing edges
//! in declared order and accumulating their probabilities.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{SimError, SimResult};

/// Tolerance applied when checking per-node outgoing probability sums.
const PROBABILITY_SUM_EPSILON: f64 = 1e-9;

/// Identifier for a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A directed, weighted link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edge {
    /// Source node.
    pub from: NodeId,
    /// Destination node.
    pub to: NodeId,
    /// Probability of following this link from `from`, in `(0, 1]`.
    pub probability: f64,
}

/// An immutable weighted digraph.
///
/// Outgoing probabilities from a node may sum to less than 1 — the source
/// data under-specifies some nodes and the walker handles the shortfall
/// explicitly rather than this type normalizing it away.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Graph {
    /// Nodes in declaration order. The first node is the walk's start.
    nodes: Vec<NodeId>,
    /// Edges in declaration order.
    edges: Vec<Edge>,
}

impl Graph {
    /// Build a validated graph from nodes and edges.
    ///
    /// # Errors
    ///
    /// Returns error if the node list is empty or contains duplicates, an
    /// edge references an unknown node, a probability is outside `(0, 1]`,
    /// or a node's outgoing probabilities sum above 1.
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> SimResult<Self> {
        let graph = Self { nodes, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Load a graph from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure, parse failure, or validation failure.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a graph from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let graph: Self = serde_yaml::from_str(yaml)?;
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> SimResult<()> {
        if self.nodes.is_empty() {
            return Err(SimError::graph("graph has no nodes"));
        }

        let unique: IndexSet<&NodeId> = self.nodes.iter().collect();
        if unique.len() != self.nodes.len() {
            return Err(SimError::graph("duplicate node ids"));
        }

        for edge in &self.edges {
            if !unique.contains(&edge.from) {
                return Err(SimError::graph(format!(
                    "edge references unknown node '{}'",
                    edge.from
                )));
            }
            if !unique.contains(&edge.to) {
                return Err(SimError::graph(format!(
                    "edge references unknown node '{}'",
                    edge.to
                )));
            }
            if edge.probability <= 0.0 || edge.probability > 1.0 {
                return Err(SimError::graph(format!(
                    "edge {} -> {} has probability {} outside (0, 1]",
                    edge.from, edge.to, edge.probability
                )));
            }
        }

        for node in &self.nodes {
            let sum: f64 = self
                .outgoing(node)
                .map(|edge| edge.probability)
                .sum();
            if sum > 1.0 + PROBABILITY_SUM_EPSILON {
                return Err(SimError::graph(format!(
                    "outgoing probabilities from '{node}' sum to {sum}, above 1"
                )));
            }
        }

        Ok(())
    }

    /// Nodes in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// All edges in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The walk's starting node (first declared node).
    #[must_use]
    pub fn start_node(&self) -> &NodeId {
        // Validation guarantees at least one node.
        &self.nodes[0]
    }

    /// Outgoing edges from a node, in declaration order.
    pub fn outgoing<'a>(&'a self, from: &'a NodeId) -> impl Iterator<Item = &'a Edge> {
        self.edges.iter().filter(move |edge| &edge.from == from)
    }

    /// The four-page demo graph from the source visualization.
    ///
    /// Note that `ben`'s outgoing probabilities sum to 0.99, which is what
    /// exercises the walker's hold-in-place path.
    #[must_use]
    pub fn sample() -> Self {
        let nodes = ["amy", "ben", "dan", "chris"]
            .into_iter()
            .map(NodeId::from)
            .collect();
        let links = [
            ("amy", "ben", 1.0),
            ("ben", "amy", 0.33),
            ("ben", "chris", 0.33),
            ("ben", "dan", 0.33),
            ("dan", "amy", 0.5),
            ("dan", "chris", 0.5),
            ("chris", "dan", 0.5),
            ("chris", "ben", 0.5),
        ];
        let edges = links
            .into_iter()
            .map(|(from, to, probability)| Edge {
                from: NodeId::from(from),
                to: NodeId::from(to),
                probability,
            })
            .collect();

        Self { nodes, edges }
    }
}
