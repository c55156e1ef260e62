//! Frame styling and layout.
//!
//! `PlotStyle` is the single immutable source of plot choices; it is built
//! once and passed by reference to every frame.

use plotters::style::RGBColor;

use super::colormap::{ColorScale, Colormap};
use crate::config::DomainBounds;

/// Immutable frame styling.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Canvas size in pixels (width, height)
    pub size: (u32, u32),
    pub background: RGBColor,
    /// Axis of symmetry at r = 0
    pub zero_axis_color: RGBColor,
    /// Domain box
    pub axis_color: RGBColor,
    pub line_width: u32,
    pub interface_color: RGBColor,
    pub interface_width: u32,
    /// Colour bar width as a fraction of canvas width
    pub colorbar_width: f64,
    /// Gap between the left colour bar's left edge and the plot, as a fraction of canvas width
    pub left_colorbar_offset: f64,
    /// Gap between the plot and the right colour bar, as a fraction of canvas width
    pub right_colorbar_offset: f64,
    /// Plot region available before the equal-aspect fit, as fractions
    /// (left, right, top, bottom) of the canvas.
    pub plot_region: (f64, f64, f64, f64),
    pub strain_rate: ColorScale,
    pub velocity: ColorScale,
    /// Title and tick label height in pixels
    pub tick_label_size: u32,
    /// Labelled ticks per colour bar, both ends included
    pub colorbar_ticks: usize,
    pub strain_rate_label: &'static str,
    pub velocity_label: &'static str,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            size: (1920, 1080),
            background: RGBColor(255, 255, 255),
            zero_axis_color: RGBColor(128, 128, 128),
            axis_color: RGBColor(0, 0, 0),
            line_width: 2,
            interface_color: RGBColor(0x00, 0xB2, 0xFF),
            interface_width: 4,
            colorbar_width: 0.03,
            left_colorbar_offset: 0.04,
            right_colorbar_offset: 0.01,
            plot_region: (0.125, 0.9, 0.12, 0.88),
            strain_rate: ColorScale::new(Colormap::HotReversed, -4.0, 0.0),
            velocity: ColorScale::new(Colormap::Purples, 0.0, 1.0),
            tick_label_size: 20,
            colorbar_ticks: 5,
            strain_rate_label: "(D:D)",
            velocity_label: "|u|",
        }
    }
}

impl PlotStyle {
    /// Same style on a different canvas size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Pixel placement of the plot and its two colour bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub plot: PixelRect,
    pub left_bar: PixelRect,
    pub right_bar: PixelRect,
}

impl FrameLayout {
    /// Fit `bounds` into the style's plot region keeping equal aspect, and
    /// place the colour bars beside it.
    pub fn compute(style: &PlotStyle, bounds: &DomainBounds) -> Self {
        let (canvas_w, canvas_h) = (style.size.0 as f64, style.size.1 as f64);
        let (left, right, top, bottom) = style.plot_region;

        let avail_x = left * canvas_w;
        let avail_y = top * canvas_h;
        let avail_w = ((right - left) * canvas_w).max(1.0);
        let avail_h = ((bottom - top) * canvas_h).max(1.0);

        let aspect = bounds.radial_span() / bounds.axial_span();
        let (plot_w, plot_h) = if avail_w / avail_h > aspect {
            (avail_h * aspect, avail_h)
        } else {
            (avail_w, avail_w / aspect)
        };
        let plot_x = avail_x + (avail_w - plot_w) / 2.0;
        let plot_y = avail_y + (avail_h - plot_h) / 2.0;

        let plot = PixelRect {
            x: plot_x.round() as i32,
            y: plot_y.round() as i32,
            width: (plot_w.round() as u32).max(1),
            height: (plot_h.round() as u32).max(1),
        };

        let bar_w = ((style.colorbar_width * canvas_w).round() as u32).max(1);
        let left_bar = PixelRect {
            x: ((plot_x - style.left_colorbar_offset * canvas_w).round() as i32).max(0),
            y: plot.y,
            width: bar_w,
            height: plot.height,
        };
        let right_bar = PixelRect {
            x: plot.right() + (style.right_colorbar_offset * canvas_w).round() as i32,
            y: plot.y,
            width: bar_w,
            height: plot.height,
        };

        Self {
            plot,
            left_bar,
            right_bar,
        }
    }
}
