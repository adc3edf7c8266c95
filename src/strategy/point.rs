//! Point-sampling strategy for pi estimation.
//!
//! Draws `(x, y)` independently uniform in the unit square and classifies
//! against the inscribed circle. The estimator is `4 * inside / total`,
//! which converges to pi at the usual `O(n^{-1/2})` Monte Carlo rate.

use crate::engine::rng::UniformSource;
use crate::engine::state::SimState;
use crate::estimate::{point_pi, Estimate};
use crate::sample::Sample;
use crate::strategy::Strategy;

/// Uniform unit-square sampling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointStrategy;

impl PointStrategy {
    /// Create a point strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for PointStrategy {
    fn name(&self) -> &'static str {
        "point"
    }

    fn draw(&mut self, rng: &mut dyn UniformSource) -> Sample {
        let x = rng.draw();
        let y = rng.draw();
        Sample::point(x, y)
    }

    fn estimate(&self, state: &SimState) -> Estimate {
        Estimate::Pi {
            value: point_pi(state.inside_count(), state.total_steps()),
        }
    }
}
