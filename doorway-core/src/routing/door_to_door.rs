use log::info;
use rayon::prelude::*;

use crate::NodeId;
use crate::model::{Query, RoadGraph};
use crate::routing::dijkstra::door_to_door_search;
use crate::routing::path::reconstruct;

/// Solved door-to-door route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    /// Road nodes driven through, from the first entry node to the last
    /// exit node inclusive
    pub path: Vec<NodeId>,
    /// Door-to-door travel time in minutes
    pub time_minutes: f64,
    /// Walked distance in kilometres, access plus egress
    pub walk_km: f64,
    /// Distance driven over road segments in kilometres
    pub vehicle_km: f64,
}

impl RouteSummary {
    /// Walked plus driven distance in kilometres
    pub fn total_km(&self) -> f64 {
        self.walk_km + self.vehicle_km
    }
}

/// Solves one door-to-door query against the network
///
/// Returns `None` when no route exists: no network node within the
/// walking radius of the source or of the destination, or no road
/// connection between the candidate nodes.
pub fn solve_query(graph: &RoadGraph, query: &Query) -> Option<RouteSummary> {
    let entries = graph.nodes_within_radius(query.source, query.radius_m);
    let exits = graph.nodes_within_radius(query.dest, query.radius_m);

    if entries.is_empty() || exits.is_empty() {
        log::trace!(
            "no walk candidates within {} m of {:?} or {:?}",
            query.radius_m,
            query.source,
            query.dest
        );
        return None;
    }

    let trace = door_to_door_search(graph, &entries, &exits)?;
    Some(reconstruct(graph, &entries, &exits, &trace))
}

/// Solves a batch of queries in parallel against the shared network.
/// Result order matches query order; unreachable queries yield `None`.
pub fn solve_queries(graph: &RoadGraph, queries: &[Query]) -> Vec<Option<RouteSummary>> {
    let summaries: Vec<Option<RouteSummary>> = queries
        .par_iter()
        .map(|query| solve_query(graph, query))
        .collect();

    let solved = summaries.iter().filter(|summary| summary.is_some()).count();
    info!("Solved {solved} of {} queries", queries.len());

    summaries
}
