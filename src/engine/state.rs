//! Accumulated simulation state.
//!
//! The sample buffer is append-only during a run and owned exclusively by
//! the engine; observers see it only through immutable snapshots. Running
//! counters are maintained alongside the buffer for cheap estimate reads
//! and must agree with a full recount at all times — [`SimState::audit`]
//! checks exactly that.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::graph::NodeId;
use crate::sample::Sample;

/// Observable snapshot of a simulation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    /// Accumulated samples in insertion order.
    samples: Vec<Sample>,
    /// Point samples that landed inside the circle.
    inside_count: u64,
    /// Needle samples that crossed a line.
    crossing_count: u64,
    /// Visit tally per node, in first-visit order.
    visits: IndexMap<NodeId, u64>,
    /// Total steps taken (one per sample).
    total_steps: u64,
    /// Whether the run is currently active.
    running: bool,
    /// Samples generated per tick.
    batch_size: u32,
}

impl SimState {
    /// Accumulated samples in insertion order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of accumulated samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether any samples have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Point samples that landed inside the circle.
    #[must_use]
    pub const fn inside_count(&self) -> u64 {
        self.inside_count
    }

    /// Needle samples that crossed a line.
    #[must_use]
    pub const fn crossing_count(&self) -> u64 {
        self.crossing_count
    }

    /// Visit tally per node.
    #[must_use]
    pub const fn visits(&self) -> &IndexMap<NodeId, u64> {
        &self.visits
    }

    /// Visits recorded for one node (0 if never visited).
    #[must_use]
    pub fn visits_for(&self, node: &NodeId) -> u64 {
        self.visits.get(node).copied().unwrap_or(0)
    }

    /// Total steps taken.
    #[must_use]
    pub const fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Whether the run is currently active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Samples generated per tick.
    #[must_use]
    pub const fn batch_size(&self) -> u32 {
        self.batch_size
    }

    /// Append one sample and update the running counters.
    pub(crate) fn push(&mut self, sample: Sample) {
        match &sample {
            Sample::Point { inside: true, .. } => self.inside_count += 1,
            Sample::Needle { crosses: true, .. } => self.crossing_count += 1,
            Sample::Walk { to, .. } => {
                *self.visits.entry(to.clone()).or_insert(0) += 1;
            }
            Sample::Point { .. } | Sample::Needle { .. } => {}
        }
        self.samples.push(sample);
        self.total_steps += 1;
    }

    /// Drop all samples and counters.
    pub(crate) fn clear(&mut self) {
        self.samples.clear();
        self.inside_count = 0;
        self.crossing_count = 0;
        self.visits.clear();
        self.total_steps = 0;
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub(crate) fn set_batch_size(&mut self, batch_size: u32) {
        self.batch_size = batch_size;
    }

    /// Verify the running counters against a full recount of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CounterDrift`] naming the first counter that
    /// disagrees with the recount.
    pub fn audit(&self) -> SimResult<()> {
        let inside = self.samples.iter().filter(|s| s.is_inside()).count() as u64;
        if inside != self.inside_count {
            return Err(SimError::CounterDrift {
                counter: "inside_count".to_string(),
                counted: inside,
                recorded: self.inside_count,
            });
        }

        let crossings = self.samples.iter().filter(|s| s.is_crossing()).count() as u64;
        if crossings != self.crossing_count {
            return Err(SimError::CounterDrift {
                counter: "crossing_count".to_string(),
                counted: crossings,
                recorded: self.crossing_count,
            });
        }

        let mut visits: IndexMap<NodeId, u64> = IndexMap::new();
        for sample in &self.samples {
            if let Sample::Walk { to, .. } = sample {
                *visits.entry(to.clone()).or_insert(0) += 1;
            }
        }
        for (node, &recorded) in &self.visits {
            let counted = visits.get(node).copied().unwrap_or(0);
            if counted != recorded {
                return Err(SimError::CounterDrift {
                    counter: format!("visits[{node}]"),
                    counted,
                    recorded,
                });
            }
        }

        if self.samples.len() as u64 != self.total_steps {
            return Err(SimError::CounterDrift {
                counter: "total_steps".to_string(),
                counted: self.samples.len() as u64,
                recorded: self.total_steps,
            });
        }

        Ok(())
    }
}
