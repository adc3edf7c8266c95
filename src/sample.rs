//! Sample data model.
//!
//! One sample is one random draw plus its derived classification. The
//! classification (`inside`, `crosses`) is computed once at generation time
//! and stored as an immutable fact — it is never recomputed from the raw
//! coordinates on read, which keeps the reducer's recount-consistency
//! check trivial.

use serde::{Deserialize, Serialize};

use crate::config::NeedleGeometry;
use crate::graph::NodeId;

/// One accumulated sample, variant by strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sample {
    /// A uniform draw in the unit square, classified against the inscribed
    /// circle of radius 0.5 centered at (0.5, 0.5).
    Point {
        /// X coordinate in `[0, 1)`.
        x: f64,
        /// Y coordinate in `[0, 1)`.
        y: f64,
        /// Whether the point fell inside the inscribed circle.
        inside: bool,
    },
    /// A needle dropped onto ruled lines.
    Needle {
        /// Horizontal drop position. Visual placement only; the crossing
        /// test depends solely on `y` and `angle` (a quirk of the source
        /// system, preserved deliberately).
        x: f64,
        /// Vertical drop position of the needle's midpoint.
        y: f64,
        /// Orientation in `[0, pi)`.
        angle: f64,
        /// Whether the needle's vertical span crosses a grid line.
        crosses: bool,
    },
    /// One random-surfer transition.
    Walk {
        /// Node the step left from.
        from: NodeId,
        /// Node the step arrived at (equal to `from` on a held step).
        to: NodeId,
    },
}

impl Sample {
    /// Classify and record a point draw.
    #[must_use]
    pub fn point(x: f64, y: f64) -> Self {
        let dx = x - 0.5;
        let dy = y - 0.5;
        let inside = dx * dx + dy * dy <= 0.25;
        Self::Point { x, y, inside }
    }

    /// Classify and record a needle drop.
    ///
    /// The needle's endpoint y-coordinates are `y ± (length/2)·sin(angle)`;
    /// it crosses when the endpoints land in different line intervals.
    #[must_use]
    pub fn needle(x: f64, y: f64, angle: f64, geometry: &NeedleGeometry) -> Self {
        let half_span = (geometry.length / 2.0) * angle.sin();
        let y1 = y - half_span;
        let y2 = y + half_span;
        let crosses =
            (y1 / geometry.spacing).floor() != (y2 / geometry.spacing).floor();
        Self::Needle { x, y, angle, crosses }
    }

    /// Record a walk transition.
    #[must_use]
    pub const fn walk(from: NodeId, to: NodeId) -> Self {
        Self::Walk { from, to }
    }

    /// Whether this is a point sample that landed inside the circle.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        matches!(self, Self::Point { inside: true, .. })
    }

    /// Whether this is a needle sample that crossed a line.
    #[must_use]
    pub const fn is_crossing(&self) -> bool {
        matches!(self, Self::Needle { crosses: true, .. })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Falsification: classification matches the circle equation.
        #[test]
        fn prop_point_classification(x in 0.0f64..1.0, y in 0.0f64..1.0) {
            let sample = Sample::point(x, y);
            let expected = (x - 0.5).powi(2) + (y - 0.5).powi(2) <= 0.25;
            prop_assert_eq!(sample.is_inside(), expected);
        }

        /// Falsification: crossing matches the interval test for any drop.
        #[test]
        fn prop_needle_classification(
            y in 0.0f64..400.0,
            angle in 0.0f64..std::f64::consts::PI,
        ) {
            let geometry = NeedleGeometry::default();
            let sample = Sample::needle(0.0, y, angle, &geometry);
            let half = (geometry.length / 2.0) * angle.sin();
            let expected = ((y - half) / geometry.spacing).floor()
                != ((y + half) / geometry.spacing).floor();
            prop_assert_eq!(sample.is_crossing(), expected);
        }
    }
}
