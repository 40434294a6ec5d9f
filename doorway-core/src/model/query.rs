//! Door-to-door query value type

use geo::Point;

/// One door-to-door request: raw source and destination points plus the
/// walking radius. The points are plan kilometres, the radius is metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub source: Point<f64>,
    pub dest: Point<f64>,
    pub radius_m: f64,
}

impl Query {
    pub fn new(source: Point<f64>, dest: Point<f64>, radius_m: f64) -> Self {
        Self {
            source,
            dest,
            radius_m,
        }
    }
}
