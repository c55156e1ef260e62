//! Decoders for the text the extraction helpers emit.
//!
//! Each decoder takes the raw stderr lines of one helper invocation and turns
//! them into typed values:
//!
//! - `facets` - interface segments, mirrored about the symmetry axis
//! - `field` - row-major sampled grids
//! - `footprint` - one `(time, value)` observation

pub mod facets;
pub mod field;
pub mod footprint;

pub use facets::{decode_facets, FacetSegment, MIN_FACET_LINES};
pub use field::{decode_field, grid_height, FieldGrid, Grid};
pub use footprint::{decode_footprint, parse_observation, CutoffObservation};

use crate::error::{PipelineError, PipelineResult};

/// Parse one numeric field, reporting the whole line on failure.
fn parse_number(field: &str, line: &str) -> PipelineResult<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::unexpected(line))
}
