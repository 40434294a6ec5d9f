//! Road network storage: graph, id map and spatial index

use geo::{Distance, Euclidean, Point};
use hashbrown::HashMap;
use log::info;
use petgraph::Undirected;
use petgraph::graph::{Edges, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rstar::{AABB, Envelope, RTree};

use crate::model::road::components::{EdgeRecord, RoadEdge, RoadNode};
use crate::{Error, Hours, NodeId, WALKING_SPEED_KPH};

/// Node entry stored in the R-tree, carrying its graph index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedNode {
    pub position: Point<f64>,
    pub index: NodeIndex,
}

impl rstar::RTreeObject for IndexedNode {
    type Envelope = AABB<Point<f64>>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl rstar::PointDistance for IndexedNode {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        Euclidean.distance(self.position, *point).powi(2)
    }
}

/// Network node reachable on foot from a query point, with the
/// straight-line distance to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkCandidate {
    pub node: NodeIndex,
    pub distance_km: f64,
}

impl WalkCandidate {
    /// Time to walk the straight-line distance, in hours
    pub fn walking_time(&self) -> Hours {
        self.distance_km / WALKING_SPEED_KPH
    }
}

/// Road network: undirected graph over intersections plus an R-tree
/// for radius lookups. Immutable after `load`.
pub struct RoadGraph {
    pub graph: UnGraph<RoadNode, RoadEdge>,
    rtree: RTree<IndexedNode>,
    id_to_index: HashMap<NodeId, NodeIndex>,
}

impl RoadGraph {
    /// Builds the network from parsed nodes and edge records
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate node ids, edges referencing unknown
    /// ids, or edges with non-positive length or speed.
    pub fn load(nodes: Vec<RoadNode>, edges: Vec<EdgeRecord>) -> Result<Self, Error> {
        let mut graph = UnGraph::with_capacity(nodes.len(), edges.len());
        let mut id_to_index = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id;
            let index = graph.add_node(node);
            if id_to_index.insert(id, index).is_some() {
                return Err(Error::DuplicateNode(id));
            }
        }

        for record in &edges {
            let from = *id_to_index
                .get(&record.from)
                .ok_or(Error::UnknownNode(record.from))?;
            let to = *id_to_index
                .get(&record.to)
                .ok_or(Error::UnknownNode(record.to))?;

            if !record.length_km.is_finite() || record.length_km <= 0.0 {
                return Err(Error::InvalidEdge {
                    from: record.from,
                    to: record.to,
                    field: "length",
                    value: record.length_km,
                });
            }
            if !record.speed_kph.is_finite() || record.speed_kph <= 0.0 {
                return Err(Error::InvalidEdge {
                    from: record.from,
                    to: record.to,
                    field: "speed",
                    value: record.speed_kph,
                });
            }

            graph.add_edge(
                from,
                to,
                RoadEdge {
                    length_km: record.length_km,
                    speed_kph: record.speed_kph,
                },
            );
        }

        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|index| IndexedNode {
                    position: graph[index].geometry,
                    index,
                })
                .collect(),
        );

        let components = petgraph::algo::connected_components(&graph);
        if components > 1 {
            log::warn!(
                "Road network has {components} disconnected components - queries spanning \
                them will be unreachable by vehicle"
            );
        }

        info!(
            "Road network loaded: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self {
            graph,
            rtree,
            id_to_index,
        })
    }

    /// All network nodes within `radius_m` metres of `point`, each with its
    /// walking distance in kilometres. Sorted by node index so downstream
    /// tie-breaking does not depend on tree shape. An empty result is a
    /// normal value.
    pub fn nodes_within_radius(&self, point: Point<f64>, radius_m: f64) -> Vec<WalkCandidate> {
        // A negative radius would square positive below
        if radius_m < 0.0 {
            return Vec::new();
        }
        let radius_km = radius_m / 1000.0;

        let mut candidates: Vec<WalkCandidate> = self
            .rtree
            .locate_within_distance(point, radius_km * radius_km)
            .map(|entry| WalkCandidate {
                node: entry.index,
                distance_km: Euclidean.distance(entry.position, point),
            })
            .collect();

        candidates.sort_unstable_by_key(|candidate| candidate.node);
        candidates
    }

    pub fn edges(&self, node: NodeIndex) -> Edges<'_, RoadEdge, Undirected> {
        self.graph.edges(node)
    }

    /// Adjacent nodes with the connecting edge data
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &RoadEdge)> + '_ {
        self.graph
            .edges(node)
            .map(|edge| (edge.target(), edge.weight()))
    }

    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_to_index.get(&id).copied()
    }

    pub fn node_id(&self, node: NodeIndex) -> Option<NodeId> {
        self.graph.node_weight(node).map(|weight| weight.id)
    }

    pub fn coordinate(&self, node: NodeIndex) -> Option<Point<f64>> {
        self.graph.node_weight(node).map(|weight| weight.geometry)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of connected components; 1 for a fully connected network
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }
}
