//! Runs one case end to end: load, solve, write

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use doorway_core::prelude::*;

use crate::report;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Map file with the node and edge tables
    #[arg(long)]
    pub map: PathBuf,
    /// Query file
    #[arg(long)]
    pub queries: PathBuf,
    /// Output file for the result records; stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Directory for per-route GeoJSON files
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    run_case(
        &args.map,
        &args.queries,
        args.output.as_deref(),
        args.geojson.as_deref(),
    )
}

pub fn run_case(
    map: &Path,
    queries: &Path,
    output: Option<&Path>,
    geojson: Option<&Path>,
) -> Result<()> {
    let load_started = Instant::now();
    let graph = load_map(map).with_context(|| format!("loading map {}", map.display()))?;
    info!(
        "Map ready in {:?}: {} nodes, {} edges",
        load_started.elapsed(),
        graph.node_count(),
        graph.edge_count()
    );

    let queries =
        load_queries(queries).with_context(|| format!("loading queries {}", queries.display()))?;

    let solve_started = Instant::now();
    let summaries = solve_queries(&graph, &queries);
    let solve_elapsed = solve_started.elapsed();

    let rendered = report::render_batch(&summaries, solve_elapsed.as_millis());
    match output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} records to {}", summaries.len(), path.display());
        }
        None => print!("{rendered}"),
    }

    if let Some(dir) = geojson {
        write_geojson_routes(dir, &graph, &queries, &summaries)?;
    }

    Ok(())
}

/// Writes one `route_<seq>.geojson` per solved query, `seq` being the
/// query's position in its file
fn write_geojson_routes(
    dir: &Path,
    graph: &RoadGraph,
    queries: &[Query],
    summaries: &[Option<RouteSummary>],
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = 0usize;
    for (seq, (query, summary)) in queries.iter().zip(summaries).enumerate() {
        if let Some(summary) = summary {
            let path = dir.join(format!("route_{seq}.geojson"));
            let text = route_to_geojson_string(graph, query, summary)?;
            fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }
    }

    info!("Wrote {written} GeoJSON routes to {}", dir.display());
    Ok(())
}
