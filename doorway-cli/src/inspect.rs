//! Map file summary for eyeballing a network before running queries

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use itertools::Itertools;

use doorway_core::prelude::*;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Map file to summarise
    #[arg(long)]
    pub map: PathBuf,
    /// Also print the full adjacency listing
    #[arg(long)]
    pub adjacency: bool,
}

pub fn inspect(args: &InspectArgs) -> Result<()> {
    let graph =
        load_map(&args.map).with_context(|| format!("loading map {}", args.map.display()))?;

    print!("{}", describe(&graph));
    if args.adjacency {
        print!("{}", adjacency_listing(&graph));
    }
    Ok(())
}

fn describe(graph: &RoadGraph) -> String {
    let nodes = graph.node_count();
    let edges = graph.edge_count();
    let mean_degree = if nodes == 0 {
        0.0
    } else {
        2.0 * edges as f64 / nodes as f64
    };

    let (x_min, x_max) = graph
        .graph
        .node_weights()
        .map(|node| node.geometry.x())
        .minmax_by(f64::total_cmp)
        .into_option()
        .unwrap_or((0.0, 0.0));
    let (y_min, y_max) = graph
        .graph
        .node_weights()
        .map(|node| node.geometry.y())
        .minmax_by(f64::total_cmp)
        .into_option()
        .unwrap_or((0.0, 0.0));

    let mut out = String::new();
    out.push_str(&format!("nodes       {nodes}\n"));
    out.push_str(&format!("edges       {edges}\n"));
    out.push_str(&format!("components  {}\n", graph.component_count()));
    out.push_str(&format!("mean degree {mean_degree:.2}\n"));
    out.push_str(&format!("x range     {x_min:.3} .. {x_max:.3}\n"));
    out.push_str(&format!("y range     {y_min:.3} .. {y_max:.3}\n"));
    out
}

/// One line per node, neighbours with the connecting edge's data
fn adjacency_listing(graph: &RoadGraph) -> String {
    let mut indices: Vec<_> = graph.graph.node_indices().collect();
    indices.sort_by_key(|&index| graph.node_id(index));

    let mut out = String::new();
    for index in indices {
        let Some(id) = graph.node_id(index) else {
            continue;
        };
        let neighbors = graph
            .neighbors(index)
            .filter_map(|(target, edge)| {
                graph.node_id(target).map(|target_id| {
                    format!(
                        "{target_id} ({} km @ {} km/h)",
                        edge.length_km, edge.speed_kph
                    )
                })
            })
            .join(", ");
        out.push_str(&format!("{id}: {neighbors}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoadGraph {
        let (nodes, edges) =
            parse_map("3\n5 0.0 0.0\n2 1.0 0.0\n9 0.0 2.0\n2\n5 2 1.0 30.0\n5 9 2.0 60.0\n")
                .unwrap();
        RoadGraph::load(nodes, edges).unwrap()
    }

    #[test]
    fn summary_reports_counts_and_extents() {
        let summary = describe(&sample());
        assert!(summary.contains("nodes       3"));
        assert!(summary.contains("edges       2"));
        assert!(summary.contains("components  1"));
        assert!(summary.contains("mean degree 1.33"));
        assert!(summary.contains("x range     0.000 .. 1.000"));
        assert!(summary.contains("y range     0.000 .. 2.000"));
    }

    #[test]
    fn summary_of_an_empty_map() {
        let (nodes, edges) = parse_map("0\n0\n").unwrap();
        let summary = describe(&RoadGraph::load(nodes, edges).unwrap());
        assert!(summary.contains("nodes       0"));
        assert!(summary.contains("mean degree 0.00"));
        assert!(summary.contains("x range     0.000 .. 0.000"));
    }

    #[test]
    fn adjacency_lists_nodes_in_id_order() {
        let listing = adjacency_listing(&sample());
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2: 5 (1 km @ 30 km/h)");
        assert!(lines[1].starts_with("5: "));
        assert!(lines[1].contains("9 (2 km @ 60 km/h)"));
        assert!(lines[1].contains("2 (1 km @ 30 km/h)"));
        assert_eq!(lines[2], "9: 5 (2 km @ 60 km/h)");
    }
}
