pub use crate::WALKING_SPEED_KPH;

// Re-export key components
pub use crate::loading::{load_map, load_queries, parse_map, parse_queries};
pub use crate::model::{Query, RoadGraph, RoadNode, WalkCandidate};
pub use crate::routing::door_to_door::{RouteSummary, solve_queries, solve_query};
pub use crate::routing::geojson::{route_to_geojson, route_to_geojson_string};

// Core types for the road network
pub use crate::Hours;
pub use crate::NodeId;
