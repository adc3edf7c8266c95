//! Running-estimate reducers.
//!
//! Pure functions over accumulated counts, recomputed after every tick.
//! The only unusual condition in the whole system lives here: a zero
//! denominator in the Buffon estimator, which is a reportable state
//! ([`Estimate::Undefined`]), never an `inf`/`NaN` leaking to observers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::NeedleGeometry;
use crate::graph::NodeId;

/// A derived statistic over the accumulated sample buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimate {
    /// A pi approximation.
    Pi {
        /// The approximation.
        value: f64,
    },
    /// No estimate is defined yet (degenerate denominator).
    Undefined,
    /// Per-node visit share. Sums to 1 whenever any steps were taken.
    Importance {
        /// Visit share per node, in node declaration order.
        shares: IndexMap<NodeId, f64>,
    },
}

impl Estimate {
    /// The pi value, if this estimate holds one.
    #[must_use]
    pub const fn pi(&self) -> Option<f64> {
        match self {
            Self::Pi { value } => Some(*value),
            _ => None,
        }
    }
}

/// Pi from point sampling: `4 * inside / total`, or 0 with no samples.
#[must_use]
pub fn point_pi(inside: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    4.0 * inside as f64 / total as f64
}

/// Pi from needle crossings: `(2 * L * total) / (spacing * crossings)`.
///
/// Returns `None` with zero crossings — the division is never performed,
/// so no infinity can propagate.
#[must_use]
pub fn needle_pi(geometry: &NeedleGeometry, crossings: u64, total: u64) -> Option<f64> {
    if crossings == 0 {
        return None;
    }
    Some((2.0 * geometry.length * total as f64) / (geometry.spacing * crossings as f64))
}

/// Per-node visit share: `visits[node] / total_steps`, all zeros before the
/// first step.
#[must_use]
pub fn importance(visits: &IndexMap<NodeId, u64>, total_steps: u64) -> IndexMap<NodeId, f64> {
    visits
        .iter()
        .map(|(node, count)| {
            let share = if total_steps == 0 {
                0.0
            } else {
                *count as f64 / total_steps as f64
            };
            (node.clone(), share)
        })
        .collect()
}
