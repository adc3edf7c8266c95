//! Pluggable sampling strategies.
//!
//! A strategy is the generation-plus-derivation rule that distinguishes the
//! three simulations: it draws one classified sample from a uniform random
//! source and knows how to reduce accumulated state to a running estimate.
//! The engine is strategy-agnostic.

pub mod needle;
pub mod point;
pub mod walk;

pub use needle::NeedleStrategy;
pub use point::PointStrategy;
pub use walk::WalkStrategy;

use crate::engine::rng::UniformSource;
use crate::engine::state::SimState;
use crate::estimate::Estimate;
use crate::sample::Sample;

/// A sampling strategy: one random draw plus its estimate formula.
pub trait Strategy {
    /// Strategy name for display and logging.
    fn name(&self) -> &'static str;

    /// Produce one sample. Pure over the random source; always succeeds.
    fn draw(&mut self, rng: &mut dyn UniformSource) -> Sample;

    /// Reduce accumulated state to the running estimate.
    fn estimate(&self, state: &SimState) -> Estimate;

    /// Return any internal strategy state to initial conditions.
    ///
    /// Stateless strategies need not override this; the walker uses it to
    /// return to its starting node.
    fn reset(&mut self) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::engine::rng::SimRng;
    use crate::graph::Graph;

    fn all_strategies() -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(PointStrategy::new()),
            Box::new(NeedleStrategy::default()),
            Box::new(WalkStrategy::new(Graph::sample())),
        ]
    }

    #[test]
    fn test_strategies_have_distinct_names() {
        let names: Vec<&str> = all_strategies().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["point", "needle", "walk"]);
    }

    #[test]
    fn test_empty_state_estimates_are_safe() {
        let state = SimState::default();
        for strategy in all_strategies() {
            let estimate = strategy.estimate(&state);
            match estimate {
                Estimate::Pi { value } => assert!((value - 0.0).abs() < f64::EPSILON),
                Estimate::Undefined => {}
                Estimate::Importance { shares } => {
                    assert!(shares.values().all(|&s| s.abs() < f64::EPSILON));
                }
            }
        }
    }

    #[test]
    fn test_draws_are_deterministic_per_seed() {
        let makers: [fn() -> Box<dyn Strategy>; 3] = [
            || Box::new(PointStrategy::new()),
            || Box::new(NeedleStrategy::default()),
            || Box::new(WalkStrategy::new(Graph::sample())),
        ];
        for make in makers {
            let mut a = make();
            let mut b = make();
            let mut rng_a = SimRng::new(11);
            let mut rng_b = SimRng::new(11);
            for _ in 0..100 {
                assert_eq!(a.draw(&mut rng_a), b.draw(&mut rng_b));
            }
        }
    }
}
