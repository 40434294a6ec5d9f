//! Loading of map and query text files
//!
//! Both inputs are count-prefixed whitespace tables: a count line, then
//! exactly that many record lines. Parsing failures abort the whole load;
//! there is no partial model.

pub mod map;
pub mod queries;

pub use map::{load_map, parse_map};
pub use queries::{load_queries, parse_queries};

use crate::Error;

/// Non-blank lines paired with their 1-based numbers in the source text
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

fn parse_count(line: &str, line_no: usize, what: &str) -> Result<usize, Error> {
    line.parse().map_err(|_| {
        Error::MalformedInput(format!(
            "line {line_no}: expected {what} count, got '{line}'"
        ))
    })
}

fn parse_field<T: std::str::FromStr>(token: &str, line_no: usize, field: &str) -> Result<T, Error> {
    token
        .parse()
        .map_err(|_| Error::MalformedInput(format!("line {line_no}: invalid {field} '{token}'")))
}

/// Parses an f64 field and rejects NaN and infinities, which `FromStr`
/// would otherwise accept
fn parse_finite(token: &str, line_no: usize, field: &str) -> Result<f64, Error> {
    let value: f64 = parse_field(token, line_no, field)?;
    if !value.is_finite() {
        return Err(Error::MalformedInput(format!(
            "line {line_no}: {field} must be finite, got '{token}'"
        )));
    }
    Ok(value)
}
