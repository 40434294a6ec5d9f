use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::Hours;
use crate::model::{RoadGraph, WalkCandidate};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

// Costs are finite for validated networks, so total ordering is sound
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap),
        // then by search index so equal-cost pops are deterministic
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of one augmented search, in dense search indices: road nodes at
/// their graph index, the virtual source at `node_count`, the virtual
/// destination one past it.
pub(crate) struct SearchTrace {
    /// Best known time per search index, hours; the last entry is the
    /// settled time at the virtual destination
    pub dist: Vec<f64>,
    /// Predecessor per search index; the edge is `Some` only when both
    /// ends of the step are road nodes
    pub prev: Vec<Option<(usize, Option<EdgeIndex>)>>,
}

impl SearchTrace {
    /// Door-to-door time at the virtual destination, hours
    pub(crate) fn total_hours(&self) -> Hours {
        self.dist[self.dist.len() - 1]
    }
}

/// Shortest door-to-door time over the road network augmented with two
/// virtual endpoints. The virtual source reaches every entry candidate at
/// its walk-in time; every exit candidate reaches the virtual destination
/// at its walk-out time. The shared graph is never touched - the extra
/// edges exist only in this function's relaxation.
///
/// Returns `None` when the virtual destination cannot be reached.
pub(crate) fn door_to_door_search(
    graph: &RoadGraph,
    entries: &[WalkCandidate],
    exits: &[WalkCandidate],
) -> Option<SearchTrace> {
    let node_count = graph.node_count();
    let source = node_count;
    let dest = node_count + 1;
    let search_len = node_count + 2;

    // Walk-out times keyed by exit node for O(1) lookup during relaxation
    let exit_times: HashMap<NodeIndex, Hours> = exits
        .iter()
        .map(|candidate| (candidate.node, candidate.walking_time()))
        .collect();

    let mut dist = vec![f64::INFINITY; search_len];
    let mut prev: Vec<Option<(usize, Option<EdgeIndex>)>> = vec![None; search_len];
    let mut settled = FixedBitSet::with_capacity(search_len);
    let mut heap = BinaryHeap::with_capacity(search_len / 4 + 1);

    dist[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // First settle is final with non-negative weights; later heap
        // entries for the same index are stale
        if settled.put(node) {
            continue;
        }

        if node == dest {
            // dist[dest] equals the popped cost at the first settle
            return Some(SearchTrace { dist, prev });
        }

        if node == source {
            // The virtual source's only edges are the entry candidates
            for candidate in entries {
                let next = candidate.node.index();
                let next_cost = cost + candidate.walking_time();
                if next_cost < dist[next] {
                    dist[next] = next_cost;
                    prev[next] = Some((source, None));
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
            continue;
        }

        let node_index = NodeIndex::new(node);
        for edge in graph.edges(node_index) {
            let next = edge.target().index();
            let next_cost = cost + edge.weight().travel_time();
            if next_cost < dist[next] {
                dist[next] = next_cost;
                prev[next] = Some((node, Some(edge.id())));
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }

        // Exit candidates additionally reach the virtual destination on foot
        if let Some(&walk_out) = exit_times.get(&node_index) {
            let next_cost = cost + walk_out;
            if next_cost < dist[dest] {
                dist[dest] = next_cost;
                prev[dest] = Some((node, None));
                heap.push(State {
                    cost: next_cost,
                    node: dest,
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::model::{EdgeRecord, RoadNode};

    fn build_graph(coords: &[(u32, f64, f64)], edges: &[(u32, u32, f64, f64)]) -> RoadGraph {
        let nodes = coords
            .iter()
            .map(|&(id, x, y)| RoadNode {
                id,
                geometry: Point::new(x, y),
            })
            .collect();
        let records = edges
            .iter()
            .map(|&(from, to, length_km, speed_kph)| EdgeRecord {
                from,
                to,
                length_km,
                speed_kph,
            })
            .collect();
        RoadGraph::load(nodes, records).unwrap()
    }

    fn candidate(graph: &RoadGraph, id: u32, distance_km: f64) -> WalkCandidate {
        WalkCandidate {
            node: graph.node_index(id).unwrap(),
            distance_km,
        }
    }

    #[test]
    fn settles_the_direct_drive() {
        // 0 -- 1 -- 2, one hour per segment
        let graph = build_graph(
            &[(0, 0.0, 0.0), (1, 60.0, 0.0), (2, 120.0, 0.0)],
            &[(0, 1, 60.0, 60.0), (1, 2, 60.0, 60.0)],
        );
        let entries = [candidate(&graph, 0, 0.0)];
        let exits = [candidate(&graph, 2, 0.0)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        assert!((trace.total_hours() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn walk_times_bracket_the_drive() {
        let graph = build_graph(&[(0, 0.0, 0.0), (1, 10.0, 0.0)], &[(0, 1, 10.0, 50.0)]);
        // 1 km walk in, 2.5 km walk out
        let entries = [candidate(&graph, 0, 1.0)];
        let exits = [candidate(&graph, 1, 2.5)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        let expected = 1.0 / 5.0 + 10.0 / 50.0 + 2.5 / 5.0;
        assert!((trace.total_hours() - expected).abs() < 1e-9);
    }

    #[test]
    fn unreachable_components_return_none() {
        let graph = build_graph(
            &[(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 100.0, 0.0), (3, 101.0, 0.0)],
            &[(0, 1, 1.0, 30.0), (2, 3, 1.0, 30.0)],
        );
        let entries = [candidate(&graph, 0, 0.1)];
        let exits = [candidate(&graph, 3, 0.1)];

        assert!(door_to_door_search(&graph, &entries, &exits).is_none());
    }

    #[test]
    fn empty_candidate_sets_return_none() {
        let graph = build_graph(&[(0, 0.0, 0.0)], &[]);
        assert!(door_to_door_search(&graph, &[], &[]).is_none());
        assert!(door_to_door_search(&graph, &[candidate(&graph, 0, 0.5)], &[]).is_none());
    }

    #[test]
    fn equal_cost_paths_resolve_to_the_lower_index_branch() {
        // Diamond with two identical-cost branches through nodes 1 and 2
        let graph = build_graph(
            &[(10, 0.0, 0.0), (20, 1.0, 1.0), (30, 1.0, -1.0), (40, 2.0, 0.0)],
            &[
                (10, 20, 1.0, 60.0),
                (10, 30, 1.0, 60.0),
                (20, 40, 1.0, 60.0),
                (30, 40, 1.0, 60.0),
            ],
        );
        let entries = [candidate(&graph, 10, 0.0)];
        let exits = [candidate(&graph, 40, 0.0)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        let end = graph.node_index(40).unwrap().index();
        let via = trace.prev[end].unwrap().0;
        assert_eq!(via, graph.node_index(20).unwrap().index());
    }

    #[test]
    fn settle_times_grow_along_predecessors() {
        let graph = build_graph(
            &[(0, 0.0, 0.0), (1, 2.0, 0.0), (2, 4.0, 0.0), (3, 2.0, 2.0)],
            &[
                (0, 1, 2.0, 40.0),
                (1, 2, 2.0, 40.0),
                (0, 3, 3.0, 60.0),
                (3, 2, 3.0, 60.0),
            ],
        );
        let entries = [candidate(&graph, 0, 0.3)];
        let exits = [candidate(&graph, 2, 0.2)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        for (index, link) in trace.prev.iter().enumerate() {
            if let Some((parent, _)) = link {
                assert!(trace.dist[*parent] <= trace.dist[index] + 1e-12);
            }
        }
    }

    #[test]
    fn picks_the_faster_of_parallel_edges() {
        let graph = build_graph(
            &[(0, 0.0, 0.0), (1, 5.0, 0.0)],
            &[(0, 1, 5.0, 25.0), (0, 1, 5.0, 100.0)],
        );
        let entries = [candidate(&graph, 0, 0.0)];
        let exits = [candidate(&graph, 1, 0.0)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        assert!((trace.total_hours() - 0.05).abs() < 1e-9);

        let end = graph.node_index(1).unwrap().index();
        let (_, edge) = trace.prev[end].unwrap();
        let taken = &graph.graph[edge.unwrap()];
        assert!((taken.speed_kph - 100.0).abs() < 1e-12);
    }

    #[test]
    fn self_loops_never_improve_a_path() {
        let graph = build_graph(
            &[(0, 0.0, 0.0), (1, 1.0, 0.0)],
            &[(0, 0, 1.0, 10.0), (0, 1, 1.0, 60.0)],
        );
        let entries = [candidate(&graph, 0, 0.0)];
        let exits = [candidate(&graph, 1, 0.0)];

        let trace = door_to_door_search(&graph, &entries, &exits).unwrap();
        assert!((trace.total_hours() - 1.0 / 60.0).abs() < 1e-9);
    }
}
