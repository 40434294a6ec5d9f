//! Map file parsing
//!
//! Layout: a node count line, that many `id x y` lines, an edge count
//! line, that many `u v length_km speed_kph` lines. Each edge line
//! describes one two-way road segment.

use std::fs;
use std::path::Path;

use geo::Point;

use super::{numbered_lines, parse_count, parse_field, parse_finite};
use crate::Error;
use crate::model::{EdgeRecord, RoadGraph, RoadNode};

/// Parses map text into node and edge records, without building the graph
///
/// # Errors
///
/// Returns `Error::MalformedInput` with the offending 1-based line number
/// on wrong field counts, unparsable numbers or truncated tables.
pub fn parse_map(input: &str) -> Result<(Vec<RoadNode>, Vec<EdgeRecord>), Error> {
    let mut lines = numbered_lines(input);

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| Error::MalformedInput("empty map file".to_string()))?;
    let node_count = parse_count(header, line_no, "node")?;

    // The count line is unvalidated input; cap the up-front allocation
    // and let the loop report truncation instead
    let mut nodes = Vec::with_capacity(node_count.min(1024));
    for _ in 0..node_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            Error::MalformedInput(format!(
                "map file truncated: expected {node_count} node lines"
            ))
        })?;
        nodes.push(parse_node(line, line_no)?);
    }

    let (line_no, header) = lines.next().ok_or_else(|| {
        Error::MalformedInput("map file truncated: missing edge count".to_string())
    })?;
    let edge_count = parse_count(header, line_no, "edge")?;

    let mut edges = Vec::with_capacity(edge_count.min(1024));
    for _ in 0..edge_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            Error::MalformedInput(format!(
                "map file truncated: expected {edge_count} edge lines"
            ))
        })?;
        edges.push(parse_edge(line, line_no)?);
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: trailing data after {edge_count} edge lines"
        )));
    }

    Ok((nodes, edges))
}

/// Reads a map file and builds the road network from it
///
/// # Errors
///
/// Returns an error if the file cannot be read, the text is malformed,
/// or the network fails validation.
pub fn load_map(path: &Path) -> Result<RoadGraph, Error> {
    let input = fs::read_to_string(path)?;
    let (nodes, edges) = parse_map(&input)?;
    RoadGraph::load(nodes, edges)
}

fn parse_node(line: &str, line_no: usize) -> Result<RoadNode, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: expected 'id x y', got {} fields",
            fields.len()
        )));
    }

    Ok(RoadNode {
        id: parse_field(fields[0], line_no, "node id")?,
        geometry: Point::new(
            parse_finite(fields[1], line_no, "x coordinate")?,
            parse_finite(fields[2], line_no, "y coordinate")?,
        ),
    })
}

fn parse_edge(line: &str, line_no: usize) -> Result<EdgeRecord, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: expected 'u v length speed', got {} fields",
            fields.len()
        )));
    }

    Ok(EdgeRecord {
        from: parse_field(fields[0], line_no, "edge endpoint")?,
        to: parse_field(fields[1], line_no, "edge endpoint")?,
        length_km: parse_finite(fields[2], line_no, "edge length")?,
        speed_kph: parse_finite(fields[3], line_no, "edge speed")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "\
3
1 0.0 0.0
2 4.0 0.0
3 4.0 3.0
2
1 2 4.0 60.0
2 3 3.0 30.0
";

    #[test]
    fn parses_a_well_formed_map() {
        let (nodes, edges) = parse_map(SMALL_MAP).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);
        assert_eq!(nodes[2].id, 3);
        assert_eq!(nodes[2].geometry, Point::new(4.0, 3.0));
        assert_eq!(edges[1].from, 2);
        assert_eq!(edges[1].to, 3);
        assert!((edges[1].speed_kph - 30.0).abs() < 1e-12);
    }

    #[test]
    fn blank_lines_are_ignored() {
        let padded = SMALL_MAP.replace("2\n1 2", "2\n\n1 2");
        let (nodes, edges) = parse_map(&padded).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse_map("1\n1 0.0\n0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("line 2")));
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let err = parse_map("1\n1 0.0 abc\n0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("'abc'")));
    }

    #[test]
    fn rejects_non_finite_edge_length() {
        let err = parse_map("2\n1 0.0 0.0\n2 1.0 0.0\n1\n1 2 inf 50.0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("finite")));
    }

    #[test]
    fn rejects_truncated_node_table() {
        let err = parse_map("3\n1 0.0 0.0\n2 1.0 0.0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("truncated")));
    }

    #[test]
    fn absurd_counts_fail_as_truncation() {
        // Parses as a usize but could never be backed by real lines
        let err = parse_map("9999999999999999999\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("truncated")));

        let err = parse_map("1\n1 0.0 0.0\n9999999999999999999\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("truncated")));
    }

    #[test]
    fn rejects_missing_edge_count() {
        let err = parse_map("1\n1 0.0 0.0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("edge count")));
    }

    #[test]
    fn rejects_trailing_data() {
        let err = parse_map(&format!("{SMALL_MAP}9 9 9.0 9.0\n")).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("trailing")));
    }

    #[test]
    fn rejects_bad_count_line() {
        let err = parse_map("many\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(msg) if msg.contains("node count")));
    }
}
