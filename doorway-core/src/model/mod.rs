//! Data model for door-to-door routing
//!
//! Contains types and structures for representing the road network
//! and the queries running against it.

pub mod query;
pub mod road;

pub use query::Query;
pub use road::components::{EdgeRecord, RoadEdge, RoadNode};
pub use road::network::{IndexedNode, RoadGraph, WalkCandidate};
