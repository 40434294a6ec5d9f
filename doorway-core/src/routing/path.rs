use petgraph::graph::NodeIndex;

use crate::NodeId;
use crate::model::{RoadGraph, WalkCandidate};
use crate::routing::dijkstra::SearchTrace;
use crate::routing::door_to_door::RouteSummary;

/// Builds the route summary from a finished search: backtracks the
/// predecessor chain from the virtual destination, strips the two virtual
/// endpoints, maps interior indices to external ids and splits the
/// distance into walked and driven kilometres.
///
/// Both candidate slices must be sorted by node index, as the locator
/// returns them.
pub(crate) fn reconstruct(
    graph: &RoadGraph,
    entries: &[WalkCandidate],
    exits: &[WalkCandidate],
    trace: &SearchTrace,
) -> RouteSummary {
    let source = graph.node_count();
    let dest = source + 1;

    let mut nodes: Vec<usize> = Vec::new();
    let mut vehicle_km = 0.0;

    let mut current = dest;
    while current != source {
        match trace.prev[current] {
            Some((parent, edge)) => {
                if current != dest {
                    nodes.push(current);
                }
                if let Some(edge_index) = edge {
                    vehicle_km += graph.graph[edge_index].length_km;
                }
                current = parent;
            }
            None => break,
        }
    }
    nodes.reverse();

    let path: Vec<NodeId> = nodes
        .iter()
        .filter_map(|&index| graph.node_id(NodeIndex::new(index)))
        .collect();

    let walk_km = walk_distance(entries, nodes.first()) + walk_distance(exits, nodes.last());

    RouteSummary {
        path,
        time_minutes: trace.total_hours() * 60.0,
        walk_km,
        vehicle_km,
    }
}

/// Walking distance recorded for `node` in a sorted candidate slice,
/// 0.0 when absent
fn walk_distance(candidates: &[WalkCandidate], node: Option<&usize>) -> f64 {
    node.and_then(|&index| {
        let target = NodeIndex::new(index);
        candidates
            .binary_search_by_key(&target, |candidate| candidate.node)
            .ok()
            .map(|pos| candidates[pos].distance_km)
    })
    .unwrap_or(0.0)
}
