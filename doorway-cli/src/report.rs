//! Result record formatting
//!
//! One record per query, in query order: the node id line, the time line,
//! three distance lines (total, walked, driven), then a blank separator.
//! Unreachable queries produce the single marker line `unreachable`. The
//! batch footer is one `<millis> ms` line of solve wall time.

use itertools::Itertools;

use doorway_core::prelude::*;

pub fn render_record(summary: Option<&RouteSummary>) -> String {
    match summary {
        Some(summary) => {
            let ids = summary.path.iter().join(" ");
            format!(
                "{ids}\n{:.2} mins\n{:.2} km\n{:.2} km\n{:.2} km\n\n",
                summary.time_minutes,
                summary.total_km(),
                summary.walk_km,
                summary.vehicle_km,
            )
        }
        None => "unreachable\n\n".to_string(),
    }
}

pub fn render_batch(summaries: &[Option<RouteSummary>], solve_millis: u128) -> String {
    let mut out = String::new();
    for summary in summaries {
        out.push_str(&render_record(summary.as_ref()));
    }
    out.push_str(&format!("{solve_millis} ms\n"));
    out
}
