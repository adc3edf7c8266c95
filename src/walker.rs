//! PageRank random-surfer walker.
//!
//! A state machine over [`NodeId`]: each step follows one outgoing edge
//! chosen by cumulative probability, restarts uniformly at a dangling node,
//! or holds in place when the draw falls past an under-specified node's
//! total outgoing probability. The hold is an explicit outcome rather than
//! a silent renormalization of the graph.

use serde::{Deserialize, Serialize};

use crate::engine::rng::UniformSource;
use crate::graph::{Graph, NodeId};

/// Outcome of one walker step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// Followed an edge to a new node.
    Moved {
        /// Node the step left from.
        from: NodeId,
        /// Node the step arrived at.
        to: NodeId,
    },
    /// Current node had no outgoing edges; restarted uniformly at random.
    Restarted {
        /// Node the restart landed on.
        to: NodeId,
    },
    /// Draw exceeded the node's total outgoing probability; stayed put.
    Held {
        /// The node the walker remained on.
        at: NodeId,
    },
}

impl Transition {
    /// The node the walker occupies after this step.
    #[must_use]
    pub const fn occupied(&self) -> &NodeId {
        match self {
            Self::Moved { to, .. } | Self::Restarted { to } => to,
            Self::Held { at } => at,
        }
    }
}

/// Random surfer over an immutable weighted digraph.
#[derive(Debug, Clone)]
pub struct PageRankWalker {
    graph: Graph,
    current: NodeId,
}

impl PageRankWalker {
    /// Create a walker positioned at the graph's first declared node.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        let current = graph.start_node().clone();
        Self { graph, current }
    }

    /// The node the walker currently occupies.
    #[must_use]
    pub const fn current(&self) -> &NodeId {
        &self.current
    }

    /// The graph being walked.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Return the walker to the starting node.
    pub fn reset(&mut self) {
        self.current = self.graph.start_node().clone();
    }

    /// Take one step.
    ///
    /// With no outgoing edges the walker restarts at a uniformly random
    /// node (dangling-node handling). Otherwise it draws `r` in `[0, 1)`
    /// and walks the outgoing edges in declared order, moving along the
    /// first edge whose cumulative probability reaches `r`. If `r` falls
    /// past the cumulative total, the walker holds at the current node.
    pub fn step(&mut self, rng: &mut dyn UniformSource) -> Transition {
        let has_outgoing = self.graph.outgoing(&self.current).next().is_some();

        if !has_outgoing {
            let idx = rng.draw_index(self.graph.node_count());
            let to = self.graph.nodes()[idx].clone();
            self.current = to.clone();
            return Transition::Restarted { to };
        }

        let r = rng.draw();
        let mut cumulative = 0.0;
        let mut destination = None;
        for edge in self.graph.outgoing(&self.current) {
            cumulative += edge.probability;
            if r <= cumulative {
                destination = Some(edge.to.clone());
                break;
            }
        }

        match destination {
            Some(to) => {
                let from = std::mem::replace(&mut self.current, to.clone());
                Transition::Moved { from, to }
            }
            None => Transition::Held {
                at: self.current.clone(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::engine::rng::{ScriptedSource, SimRng};
    use crate::graph::Edge;

    fn weighted_three_way() -> Graph {
        // Cumulative sums from 'start': 0.33, 0.66, 1.00.
        let nodes = ["start", "a", "b", "c"]
            .into_iter()
            .map(NodeId::from)
            .collect();
        let edges = [("start", "a", 0.33), ("start", "b", 0.33), ("start", "c", 0.34)]
            .into_iter()
            .map(|(from, to, probability)| Edge {
                from: NodeId::from(from),
                to: NodeId::from(to),
                probability,
            })
            .collect();
        Graph::new(nodes, edges).expect("valid graph")
    }

    #[test]
    fn test_starts_at_first_node() {
        let walker = PageRankWalker::new(Graph::sample());
        assert_eq!(walker.current().as_str(), "amy");
    }

    #[test]
    fn test_weighted_tie_break() {
        // r = 0.335 falls past the first cumulative bound (0.33) and within
        // the second (0.66), so the walker must move to 'b'.
        let mut walker = PageRankWalker::new(weighted_three_way());
        let mut source = ScriptedSource::new(vec![0.335]);

        let transition = walker.step(&mut source);
        assert_eq!(
            transition,
            Transition::Moved {
                from: NodeId::from("start"),
                to: NodeId::from("b"),
            }
        );
        assert_eq!(walker.current().as_str(), "b");
    }

    #[test]
    fn test_first_edge_wins_at_low_draw() {
        let mut walker = PageRankWalker::new(weighted_three_way());
        let mut source = ScriptedSource::new(vec![0.1]);

        let transition = walker.step(&mut source);
        assert_eq!(transition.occupied().as_str(), "a");
    }

    #[test]
    fn test_underspecified_node_holds() {
        // ben's outgoing sum is 0.99; a draw of 0.995 fires no edge.
        let graph = Graph::sample();
        let mut walker = PageRankWalker::new(graph);
        walker.current = NodeId::from("ben");

        let mut source = ScriptedSource::new(vec![0.995]);
        let transition = walker.step(&mut source);
        assert_eq!(
            transition,
            Transition::Held {
                at: NodeId::from("ben"),
            }
        );
        assert_eq!(walker.current().as_str(), "ben");
    }

    #[test]
    fn test_dangling_node_restarts() {
        let nodes = vec![NodeId::from("a"), NodeId::from("island")];
        let edges = vec![Edge {
            from: NodeId::from("a"),
            to: NodeId::from("island"),
            probability: 1.0,
        }];
        let graph = Graph::new(nodes, edges).expect("valid graph");
        let mut walker = PageRankWalker::new(graph);
        walker.current = NodeId::from("island");

        let mut rng = SimRng::new(42);
        let transition = walker.step(&mut rng);
        assert!(matches!(transition, Transition::Restarted { .. }));
    }

    #[test]
    fn test_restart_is_uniform() {
        // Chi-square goodness of fit over a seeded run: 4 destinations,
        // 3 degrees of freedom, 95% critical value 7.815.
        let nodes = ["w", "x", "y", "z"].into_iter().map(NodeId::from).collect();
        let graph = Graph::new(nodes, vec![]).expect("valid graph");
        let mut walker = PageRankWalker::new(graph.clone());
        let mut rng = SimRng::new(42);

        let trials = 40_000u64;
        let mut counts = vec![0u64; 4];
        for _ in 0..trials {
            let transition = walker.step(&mut rng);
            let idx = graph
                .nodes()
                .iter()
                .position(|n| n == transition.occupied())
                .expect("known node");
            counts[idx] += 1;
        }

        let expected = trials as f64 / 4.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(
            chi_square < 7.815,
            "restart distribution not uniform: chi^2 = {chi_square}, counts = {counts:?}"
        );
    }

    #[test]
    fn test_reset_restores_start() {
        let mut walker = PageRankWalker::new(Graph::sample());
        let mut rng = SimRng::new(42);
        for _ in 0..10 {
            walker.step(&mut rng);
        }
        walker.reset();
        assert_eq!(walker.current().as_str(), "amy");
    }

    #[test]
    fn test_amy_always_moves_to_ben() {
        // amy has a single outgoing edge with probability 1.0.
        let mut walker = PageRankWalker::new(Graph::sample());
        let mut rng = SimRng::new(42);
        for _ in 0..100 {
            walker.reset();
            let transition = walker.step(&mut rng);
            assert_eq!(transition.occupied().as_str(), "ben");
        }
    }

    #[test]
    fn test_transition_occupied() {
        let moved = Transition::Moved {
            from: NodeId::from("a"),
            to: NodeId::from("b"),
        };
        assert_eq!(moved.occupied().as_str(), "b");

        let held = Transition::Held {
            at: NodeId::from("c"),
        };
        assert_eq!(held.occupied().as_str(), "c");
    }

    #[test]
    fn test_determinism() {
        let mut walker1 = PageRankWalker::new(Graph::sample());
        let mut walker2 = PageRankWalker::new(Graph::sample());
        let mut rng1 = SimRng::new(7);
        let mut rng2 = SimRng::new(7);

        for _ in 0..1000 {
            assert_eq!(walker1.step(&mut rng1), walker2.step(&mut rng2));
        }
    }
}
