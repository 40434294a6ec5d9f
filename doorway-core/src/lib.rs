//! Door-to-door travel-time routing over a plan-coordinate road network.
//!
//! A query carries a raw source point, a raw destination point and a
//! walking radius in metres. The traveler walks at a fixed speed from the
//! source to any network node within the radius, drives the road network
//! using per-segment length and speed, and walks out from a node within
//! the radius of the destination. The engine finds the minimum-time route
//! and reports the node path plus the walked/driven distance split.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// External identifier of a road network node
pub type NodeId = u32;

/// Internal travel times are carried in hours; summaries convert to minutes
pub type Hours = f64;

/// Fixed walking speed for access and egress legs, km/h
pub const WALKING_SPEED_KPH: f64 = 5.0;
