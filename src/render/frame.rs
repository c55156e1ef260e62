//! Frame composition.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;

use super::colormap::ColorScale;
use super::style::{FrameLayout, PixelRect, PlotStyle};
use crate::config::DomainBounds;
use crate::decode::{FacetSegment, FieldGrid, Grid};
use crate::error::{PipelineError, PipelineResult};

/// The symmetry axis dash pattern repeats every 5.5 of these divisions.
const DASH_DIVISIONS: usize = 40;

const FONT_FAMILY: &str = "sans-serif";
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Pixels between text and what it annotates.
const TEXT_GAP: i32 = 8;
const TICK_LENGTH: i32 = 5;

static FONT: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the embedded font with plotters, once per process.
fn ensure_font() -> Result<(), String> {
    FONT.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_BYTES)
            .map_err(|_| "embedded font could not be parsed".to_string())
    })
    .clone()
}

/// Which side of its colour bar the ticks and labels go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarSide {
    Left,
    Right,
}

/// Render the frame for the snapshot at `time` and write it to `target` as PNG.
///
/// The strain-rate layer is drawn reflected onto `r < 0` and the velocity
/// layer on its natural extent. NaN samples stay background-coloured.
pub fn compose_frame(
    field: &FieldGrid,
    facets: &[FacetSegment],
    bounds: &DomainBounds,
    time: f64,
    target: &Path,
    style: &PlotStyle,
) -> PipelineResult<()> {
    let fail = |e: &dyn std::fmt::Display| PipelineError::Render {
        path: target.to_path_buf(),
        message: e.to_string(),
    };

    ensure_font().map_err(|e| fail(&e))?;
    let root = BitMapBackend::new(target, style.size).into_drawing_area();
    draw_frame(&root, field, facets, bounds, time, style).map_err(|e| fail(&e))?;
    root.present().map_err(|e| fail(&e))?;
    Ok(())
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    field: &FieldGrid,
    facets: &[FacetSegment],
    bounds: &DomainBounds,
    time: f64,
    style: &PlotStyle,
) -> DrawResult<DB> {
    let layout = FrameLayout::compute(style, bounds);
    root.fill(&style.background)?;

    let plot = layout.plot;
    let plot_area = root
        .clone()
        .shrink((plot.x, plot.y), (plot.width, plot.height));

    draw_field(&plot_area, field, bounds, plot, style)?;

    let mut chart = ChartBuilder::on(&plot_area)
        .build_cartesian_2d(bounds.rmin()..bounds.rmax(), bounds.zmin()..bounds.zmax())?;

    let axis_style = style.axis_color.stroke_width(style.line_width);
    let (rmin, rmax, zmin, zmax) = (bounds.rmin(), bounds.rmax(), bounds.zmin(), bounds.zmax());
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(rmin, zmin), (rmax, zmin), (rmax, zmax), (rmin, zmax), (rmin, zmin)],
        axis_style,
    )))?;

    let zero_style = style.zero_axis_color.stroke_width(style.line_width);
    chart.draw_series(
        dash_dot(zmin, zmax)
            .into_iter()
            .map(|(z0, z1)| PathElement::new(vec![(0.0, z0), (0.0, z1)], zero_style)),
    )?;

    let interface_style = style.interface_color.stroke_width(style.interface_width);
    chart.draw_series(
        facets
            .iter()
            .map(|s| PathElement::new(vec![s.start, s.end], interface_style)),
    )?;

    let title = text_style(style, Pos::new(HPos::Center, VPos::Bottom));
    root.draw_text(
        &frame_title(time),
        &title,
        (plot.x + plot.width as i32 / 2, plot.y - TEXT_GAP),
    )?;

    draw_colorbar(
        root,
        layout.left_bar,
        &style.strain_rate,
        style.strain_rate_label,
        BarSide::Left,
        style,
    )?;
    draw_colorbar(
        root,
        layout.right_bar,
        &style.velocity,
        style.velocity_label,
        BarSide::Right,
        style,
    )
}

fn text_style(style: &PlotStyle, pos: Pos) -> TextStyle<'_> {
    TextStyle::from((FONT_FAMILY, f64::from(style.tick_label_size)).into_font())
        .color(&style.axis_color)
        .pos(pos)
}

/// Time readout shown above the plot.
pub(crate) fn frame_title(time: f64) -> String {
    format!("t/τ₀ = {:4.3}", time)
}

/// Rasterise both scalar layers pixel by pixel (nearest sample).
fn draw_field<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    field: &FieldGrid,
    bounds: &DomainBounds,
    plot: PixelRect,
    style: &PlotStyle,
) -> DrawResult<DB> {
    let (Some((r_lo, r_hi)), Some((z_lo, z_hi))) = (field.radial_extent(), field.axial_extent())
    else {
        return Ok(());
    };

    let (w, h) = (plot.width as f64, plot.height as f64);
    for py in 0..plot.height {
        let z = bounds.zmax() - (py as f64 + 0.5) / h * bounds.axial_span();
        let Some(row) = cell_index(z, z_lo, z_hi, field.height()) else {
            continue;
        };
        for px in 0..plot.width {
            let r = bounds.rmin() + (px as f64 + 0.5) / w * bounds.radial_span();
            let color = if let Some(col) = cell_index(r, r_lo, r_hi, field.width()) {
                sample(&field.velocity, row, col, &style.velocity)
            } else if let Some(col) = cell_index(-r, r_lo, r_hi, field.width()) {
                sample(&field.strain_rate, row, col, &style.strain_rate)
            } else {
                None
            };
            if let Some(color) = color {
                area.draw_pixel((px as i32, py as i32), &color)?;
            }
        }
    }
    Ok(())
}

fn sample(grid: &Grid, row: usize, col: usize, scale: &ColorScale) -> Option<RGBColor> {
    grid.get(row, col).and_then(|v| scale.color(v))
}

/// Vertical colour bar with `vmax` at the top, outlined in the axis colour,
/// with labelled ticks on `side` and its label above.
fn draw_colorbar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bar: PixelRect,
    scale: &ColorScale,
    label: &str,
    side: BarSide,
    style: &PlotStyle,
) -> DrawResult<DB> {
    let rows = bar.height.max(1);
    for i in 0..rows {
        let t = 1.0 - (i as f64 + 0.5) / rows as f64;
        let y = bar.y + i as i32;
        root.draw(&Rectangle::new(
            [(bar.x, y), (bar.right(), y + 1)],
            scale.color_at_fraction(t).filled(),
        ))?;
    }
    let outline = style.axis_color.stroke_width(1);
    root.draw(&Rectangle::new([(bar.x, bar.y), (bar.right(), bar.bottom())], outline))?;

    let (edge, tick_end, hpos) = match side {
        BarSide::Left => (bar.x, bar.x - TICK_LENGTH, HPos::Right),
        BarSide::Right => (bar.right(), bar.right() + TICK_LENGTH, HPos::Left),
    };
    let label_x = match side {
        BarSide::Left => tick_end - 3,
        BarSide::Right => tick_end + 3,
    };
    let tick_text = text_style(style, Pos::new(hpos, VPos::Center));
    for (fraction, value) in colorbar_ticks(scale, style.colorbar_ticks) {
        let y = bar.bottom() - (fraction * bar.height as f64).round() as i32;
        root.draw(&PathElement::new(vec![(edge, y), (tick_end, y)], outline))?;
        root.draw_text(&tick_label(value), &tick_text, (label_x, y))?;
    }

    let label_text = text_style(style, Pos::new(HPos::Center, VPos::Bottom));
    root.draw_text(
        label,
        &label_text,
        (bar.x + bar.width as i32 / 2, bar.y - TEXT_GAP),
    )
}

/// `count` evenly spaced ticks as `(fraction of bar height, value)`, from
/// `vmin` at the bottom to `vmax` at the top.
pub(crate) fn colorbar_ticks(scale: &ColorScale, count: usize) -> Vec<(f64, f64)> {
    let span = scale.vmax() - scale.vmin();
    (0..count)
        .map(|k| {
            let t = if count > 1 {
                k as f64 / (count - 1) as f64
            } else {
                0.0
            };
            (t, scale.vmin() + t * span)
        })
        .collect()
}

pub(crate) fn tick_label(value: f64) -> String {
    format!("{:.2}", value)
}

/// Index of the cell holding `value` when `[lo, hi]` is split into `n` cells.
pub(crate) fn cell_index(value: f64, lo: f64, hi: f64, n: usize) -> Option<usize> {
    if n == 0 || value.is_nan() || value < lo || value > hi {
        return None;
    }
    if hi <= lo {
        return Some(0);
    }
    let t = (value - lo) / (hi - lo);
    Some(((t * n as f64) as usize).min(n - 1))
}

/// Dash-dot pattern along `[zmin, zmax]` as `(start, end)` pieces.
pub(crate) fn dash_dot(zmin: f64, zmax: f64) -> Vec<(f64, f64)> {
    let unit = (zmax - zmin) / DASH_DIVISIONS as f64;
    let pattern = [3.0 * unit, unit, 0.5 * unit, unit];
    let mut pieces = Vec::new();
    let mut z = zmin;
    let mut step = 0;
    while z < zmax && unit > 0.0 {
        let len = pattern[step % pattern.len()];
        let end = (z + len).min(zmax);
        if step % 2 == 0 {
            pieces.push((z, end));
        }
        z = end;
        step += 1;
    }
    pieces
}
