//! Road network model

pub mod components;
pub mod network;

pub use components::{EdgeRecord, RoadEdge, RoadNode};
pub use network::{IndexedNode, RoadGraph, WalkCandidate};
