use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Duplicate node id {0} in map data")]
    DuplicateNode(NodeId),
    #[error("Edge references unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("Invalid edge {from}-{to}: {field} = {value}")]
    InvalidEdge {
        from: NodeId,
        to: NodeId,
        field: &'static str,
        value: f64,
    },
    #[error("GeoJSON error: {0}")]
    GeoJson(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
