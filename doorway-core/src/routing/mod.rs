//! Door-to-door routing over the road network

pub(crate) mod dijkstra;
pub mod door_to_door;
pub mod geojson;
pub(crate) mod path;

pub use door_to_door::{RouteSummary, solve_queries, solve_query};
pub use geojson::{route_to_geojson, route_to_geojson_string};
