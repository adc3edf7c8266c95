//! Buffon's needle strategy.
//!
//! Drops needles of length `L` onto a plane ruled with parallel lines of
//! spacing `d >= L`, drawing the midpoint uniformly over the canvas and the
//! orientation uniformly in `[0, pi)`. The crossing probability is
//! `2L / (pi d)`, so `pi ~= 2 L N / (d C)` for `N` drops and `C` crossings.

use crate::config::NeedleGeometry;
use crate::engine::rng::UniformSource;
use crate::engine::state::SimState;
use crate::estimate::{needle_pi, Estimate};
use crate::sample::Sample;
use crate::strategy::Strategy;

/// Needle dropping over caller-supplied geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedleStrategy {
    geometry: NeedleGeometry,
}

impl NeedleStrategy {
    /// Create a needle strategy with the given geometry.
    #[must_use]
    pub const fn new(geometry: NeedleGeometry) -> Self {
        Self { geometry }
    }

    /// The geometry in use.
    #[must_use]
    pub const fn geometry(&self) -> &NeedleGeometry {
        &self.geometry
    }
}

impl Strategy for NeedleStrategy {
    fn name(&self) -> &'static str {
        "needle"
    }

    fn draw(&mut self, rng: &mut dyn UniformSource) -> Sample {
        let x = rng.draw_range(0.0, self.geometry.width);
        let y = rng.draw_range(0.0, self.geometry.height);
        let angle = rng.draw_range(0.0, std::f64::consts::PI);
        Sample::needle(x, y, angle, &self.geometry)
    }

    fn estimate(&self, state: &SimState) -> Estimate {
        match needle_pi(&self.geometry, state.crossing_count(), state.total_steps()) {
            Some(value) => Estimate::Pi { value },
            None => Estimate::Undefined,
        }
    }
}
