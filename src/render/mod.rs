//! PNG frame rendering.
//!
//! Frames are drawn with the bitmap backend. Text uses a font embedded in the
//! binary, so rendering never depends on fonts installed on the host.

pub mod colormap;
mod frame;
pub mod style;

pub use colormap::{ColorScale, Colormap};
pub use frame::compose_frame;
pub use style::{FrameLayout, PixelRect, PlotStyle};
