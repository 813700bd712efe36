//! Clock-style polar geometry: angles are in degrees, `0°` points to the top
//! of the circle and grows clockwise (SVG y axis points down).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along the clock angle `degrees`.
    pub fn on_circle(&self, radius: f64, degrees: f64) -> Self {
        let angle = (degrees - 90.0).to_radians();
        Self::new(
            self.x + radius * angle.cos(),
            self.y + radius * angle.sin(),
        )
    }
}

/// Returns `(start, end)` with `end` lifted by a full turn when the arc wraps
/// through 360°.
pub fn normalize_arc(start: f64, end: f64) -> (f64, f64) {
    if end < start {
        (start, end + 360.0)
    } else {
        (start, end)
    }
}

pub fn circumference(radius: f64) -> f64 {
    2.0 * std::f64::consts::PI * radius
}
