//! Sampled field decoding.
//!
//! The field helper prints one `z r strain velocity` line per sample, row by
//! row, with a fixed number of samples per row. The number of rows is not
//! printed; it is recovered from the sample count, which must divide evenly.
//! A remainder means the helper output was truncated or malformed.
//!
//! Field grids are not mirrored here. The renderer mirrors the strain-rate
//! layer by drawing it with a reflected extent.

use super::parse_number;
use crate::error::{PipelineError, PipelineResult};

/// Number of rows for `samples` values laid out `width` per row.
///
/// Fails unless the division is exact and yields at least one row.
pub fn grid_height(samples: usize, width: usize) -> PipelineResult<usize> {
    if width == 0 || samples == 0 || samples % width != 0 {
        return Err(PipelineError::MalformedGridOutput { samples, width });
    }
    Ok(samples / width)
}

/// A row-major 2D grid of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Vec<f64>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Reshape a flat sequence into rows of `width` values.
    pub fn from_row_major(values: Vec<f64>, width: usize) -> PipelineResult<Self> {
        let height = grid_height(values.len(), width)?;
        Ok(Self {
            values,
            height,
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.height && col < self.width {
            Some(self.values[row * self.width + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.height {
            let start = row * self.width;
            Some(&self.values[start..start + self.width])
        } else {
            None
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Smallest value, ignoring NaN.
    pub fn min(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Largest value, ignoring NaN.
    pub fn max(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }
}

/// Coordinate and scalar grids for one snapshot. All four share one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    pub r: Grid,
    pub z: Grid,
    pub strain_rate: Grid,
    pub velocity: Grid,
}

impl FieldGrid {
    pub fn height(&self) -> usize {
        self.r.height()
    }

    pub fn width(&self) -> usize {
        self.r.width()
    }

    /// `(min r, max r)` over the sampled points.
    pub fn radial_extent(&self) -> Option<(f64, f64)> {
        Some((self.r.min()?, self.r.max()?))
    }

    /// `(min z, max z)` over the sampled points.
    pub fn axial_extent(&self) -> Option<(f64, f64)> {
        Some((self.z.min()?, self.z.max()?))
    }
}

/// Decode field helper output sampled with `width` points per row.
pub fn decode_field<S: AsRef<str>>(lines: &[S], width: usize) -> PipelineResult<FieldGrid> {
    let mut r = Vec::new();
    let mut z = Vec::new();
    let mut strain_rate = Vec::new();
    let mut velocity = Vec::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(PipelineError::unexpected(line));
        }
        z.push(parse_number(fields[0], line)?);
        r.push(parse_number(fields[1], line)?);
        strain_rate.push(parse_number(fields[2], line)?);
        velocity.push(parse_number(fields[3], line)?);
    }

    // Check once up front so the error names the real sample count
    grid_height(r.len(), width)?;

    Ok(FieldGrid {
        r: Grid::from_row_major(r, width)?,
        z: Grid::from_row_major(z, width)?,
        strain_rate: Grid::from_row_major(strain_rate, width)?,
        velocity: Grid::from_row_major(velocity, width)?,
    })
}
