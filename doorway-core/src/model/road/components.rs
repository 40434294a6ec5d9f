//! Road network components - nodes, edges and raw edge records

use geo::Point;

use crate::{Hours, NodeId};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Intersection id from the map file
    pub id: NodeId,
    /// Node coordinates, kilometres on the map plane
    pub geometry: Point<f64>,
}

/// Road graph edge (two-way road segment)
#[derive(Debug, Clone, PartialEq)]
pub struct RoadEdge {
    /// Segment length in kilometres
    pub length_km: f64,
    /// Driving speed over the segment in km/h
    pub speed_kph: f64,
}

impl RoadEdge {
    /// Time to drive the segment, in hours
    pub fn travel_time(&self) -> Hours {
        self.length_km / self.speed_kph
    }
}

/// Edge line as read from the map file, before endpoint ids are resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub length_km: f64,
    pub speed_kph: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_time_is_length_over_speed() {
        let edge = RoadEdge {
            length_km: 90.0,
            speed_kph: 60.0,
        };
        assert!((edge.travel_time() - 1.5).abs() < 1e-12);
    }
}
