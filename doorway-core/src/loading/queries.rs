//! Query file parsing
//!
//! Layout: a query count line, then that many
//! `src_x src_y dst_x dst_y radius_m` lines.

use std::fs;
use std::path::Path;

use geo::Point;
use log::info;

use super::{numbered_lines, parse_count, parse_finite};
use crate::Error;
use crate::model::Query;

/// Parses query text into a list of queries
///
/// # Errors
///
/// Returns `Error::MalformedInput` with the offending 1-based line number
/// on wrong field counts, unparsable numbers, negative radii or a
/// truncated table.
pub fn parse_queries(input: &str) -> Result<Vec<Query>, Error> {
    let mut lines = numbered_lines(input);

    let (line_no, header) = lines
        .next()
        .ok_or_else(|| Error::MalformedInput("empty query file".to_string()))?;
    let query_count = parse_count(header, line_no, "query")?;

    // The count line is unvalidated input; cap the up-front allocation
    // and let the loop report truncation instead
    let mut queries = Vec::with_capacity(query_count.min(1024));
    for _ in 0..query_count {
        let (line_no, line) = lines.next().ok_or_else(|| {
            Error::MalformedInput(format!(
                "query file truncated: expected {query_count} query lines"
            ))
        })?;
        queries.push(parse_query(line, line_no)?);
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: trailing data after {query_count} query lines"
        )));
    }

    Ok(queries)
}

/// Reads and parses a query file
///
/// # Errors
///
/// Returns an error if the file cannot be read or the text is malformed.
pub fn load_queries(path: &Path) -> Result<Vec<Query>, Error> {
    let input = fs::read_to_string(path)?;
    let queries = parse_queries(&input)?;
    info!("Loaded {} queries", queries.len());
    Ok(queries)
}

fn parse_query(line: &str, line_no: usize) -> Result<Query, Error> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: expected 'src_x src_y dst_x dst_y radius', got {} fields",
            fields.len()
        )));
    }

    let radius_m = parse_finite(fields[4], line_no, "radius")?;
    if radius_m < 0.0 {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: radius must be non-negative, got {radius_m}"
        )));
    }

    Ok(Query {
        source: Point::new(
            parse_finite(fields[0], line_no, "source x")?,
            parse_finite(fields[1], line_no, "source y")?,
        ),
        dest: Point::new(
            parse_finite(fields[2], line_no, "destination x")?,
            parse_finite(fields[3], line_no, "destination y")?,
        ),
        radius_m,
    })
}
