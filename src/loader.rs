//! Point loader for the line-oriented `name x y` format.
//!
//! ```text
//! v0 120 45
//! v1 30 300
//!
//! v2 410 210
//! ```
//!
//! Fields are separated by whitespace; blank lines are skipped.

use crate::error::{Error, Result};
use crate::ga::Point;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads points from the file at `path`.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(BufReader::new(file))?;
    log::info!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parses points from any buffered reader.
pub fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_record(i + 1, &line)?);
    }
    Ok(points)
}

fn parse_record(line_no: usize, line: &str) -> Result<Point> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, x, y] = fields[..] else {
        return Err(Error::MalformedRecord {
            line: line_no,
            content: line.to_string(),
        });
    };
    let coordinate = |value: &str| {
        value.parse::<i32>().map_err(|_| Error::InvalidCoordinate {
            line: line_no,
            value: value.to_string(),
        })
    };
    Ok(Point::new(name, coordinate(x)?, coordinate(y)?))
}
