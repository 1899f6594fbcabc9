//! Route interpolation.
//!
//! The dense path doubles as the enemies' timeline: an enemy that has
//! traveled `d` units sits at `path[ceil(d)]`, regardless of the step size
//! used to build the path.

// Step counts are floored distances, so the casts are intentional
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use serde::{Deserialize, Serialize};

/// A corner of the enemy route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

impl Waypoint {
    /// Create a waypoint.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An interpolated point on the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

impl PathPoint {
    /// Euclidean distance to `(x, y)`.
    #[must_use]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Default spacing between interpolated points.
pub const DEFAULT_STEP: f64 = 1.0;

/// Interpolate `waypoints` into points spaced `step` apart.
///
/// Each segment contributes `floor(len / step) + 1` points including both
/// endpoints, so joins appear twice. Downstream index lookups depend on
/// that duplication. A segment shorter than `step` contributes only its
/// start point.
#[must_use]
pub fn interpolate(waypoints: &[Waypoint], step: f64) -> Vec<PathPoint> {
    let mut full_path = Vec::new();
    if !(step.is_finite() && step > 0.0) {
        return full_path;
    }

    for pair in waypoints.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let steps = (dx.hypot(dy) / step).floor() as usize;

        if steps == 0 {
            full_path.push(PathPoint { x: start.x, y: start.y });
            continue;
        }

        let n = steps as f64;
        full_path.extend((0..=steps).map(|j| {
            let j = j as f64;
            PathPoint {
                x: start.x + (dx / n) * j,
                y: start.y + (dy / n) * j,
            }
        }));
    }

    full_path
}
