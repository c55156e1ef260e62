//! Interface facet decoding.
//!
//! The facet helper prints one `z r` point per line and separates independent
//! polylines with a blank line. The first two points of a block form its
//! segment; any further points up to the next blank line are ignored. Every
//! segment is emitted twice, once as sampled (r >= 0) and once reflected to
//! -r, so the full cross-section can be drawn.

use super::parse_number;
use crate::error::{PipelineError, PipelineResult};

/// Outputs with this many non-blank lines or fewer carry no interface.
pub const MIN_FACET_LINES: usize = 100;

/// A single interface segment in `(r, z)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetSegment {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl FacetSegment {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    /// The same segment reflected about the axis `r = 0`.
    pub fn mirrored(&self) -> Self {
        Self {
            start: (-self.start.0, self.start.1),
            end: (-self.end.0, self.end.1),
        }
    }
}

/// Decode facet helper output into mirrored segment pairs.
///
/// Returns an empty list (not an error) when the output is too short to hold
/// an interface. A block holding a single point yields nothing.
pub fn decode_facets<S: AsRef<str>>(lines: &[S]) -> PipelineResult<Vec<FacetSegment>> {
    let non_blank = lines
        .iter()
        .filter(|line| !line.as_ref().trim().is_empty())
        .count();
    if non_blank <= MIN_FACET_LINES {
        return Ok(Vec::new());
    }

    let mut segments = Vec::with_capacity(non_blank);
    let mut pending: Option<(f64, f64)> = None;
    // Set once the current block has produced its segment
    let mut paired = false;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            pending = None;
            paired = false;
            continue;
        }
        if paired {
            continue;
        }
        let point = parse_point(line)?;
        match pending.take() {
            None => pending = Some(point),
            Some(start) => {
                let segment = FacetSegment::new(start, point);
                segments.push(segment);
                segments.push(segment.mirrored());
                paired = true;
            }
        }
    }

    Ok(segments)
}

/// Parse a `z r` line into an `(r, z)` point.
fn parse_point(line: &str) -> PipelineResult<(f64, f64)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(PipelineError::unexpected(line));
    }
    let z = parse_number(fields[0], line)?;
    let r = parse_number(fields[1], line)?;
    Ok((r, z))
}
