//! Random-surfer strategy over a fixed graph.
//!
//! Wraps [`PageRankWalker`]: each sample is one transition, and the
//! estimate is the per-node visit share in graph declaration order. Every
//! step records a visit to the node the walker ends up on — including held
//! steps — so the shares always form a probability distribution.

use indexmap::IndexMap;

use crate::engine::rng::UniformSource;
use crate::engine::state::SimState;
use crate::estimate::{importance, Estimate};
use crate::graph::{Graph, NodeId};
use crate::sample::Sample;
use crate::strategy::Strategy;
use crate::walker::PageRankWalker;

/// PageRank random walk over a caller-supplied graph.
#[derive(Debug, Clone)]
pub struct WalkStrategy {
    walker: PageRankWalker,
}

impl WalkStrategy {
    /// Create a walk strategy over the given graph.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self {
            walker: PageRankWalker::new(graph),
        }
    }

    /// The node the walker currently occupies.
    #[must_use]
    pub const fn current(&self) -> &NodeId {
        self.walker.current()
    }

    /// The graph being walked.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        self.walker.graph()
    }
}

impl Strategy for WalkStrategy {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn draw(&mut self, rng: &mut dyn UniformSource) -> Sample {
        let from = self.walker.current().clone();
        let transition = self.walker.step(rng);
        Sample::walk(from, transition.occupied().clone())
    }

    fn estimate(&self, state: &SimState) -> Estimate {
        // Tallies in graph declaration order so unvisited nodes still
        // appear with share zero.
        let visits: IndexMap<NodeId, u64> = self
            .walker
            .graph()
            .nodes()
            .iter()
            .map(|node| (node.clone(), state.visits_for(node)))
            .collect();
        Estimate::Importance {
            shares: importance(&visits, state.total_steps()),
        }
    }

    fn reset(&mut self) {
        self.walker.reset();
    }
}
