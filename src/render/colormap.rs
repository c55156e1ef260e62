//! Sequential colormaps for scalar field layers.

use plotters::style::RGBColor;

/// Built-in colormaps, sampled by linear interpolation between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// White through yellow and red to black.
    HotReversed,
    /// Near-white to deep purple.
    Purples,
}

type Stop = (f64, [u8; 3]);

const HOT_REVERSED: &[Stop] = &[
    (0.0, [255, 255, 255]),
    (0.254, [255, 255, 0]),
    (0.635, [255, 0, 0]),
    (1.0, [11, 0, 0]),
];

const PURPLES: &[Stop] = &[
    (0.0, [252, 251, 253]),
    (0.125, [239, 237, 245]),
    (0.25, [218, 218, 235]),
    (0.375, [188, 189, 220]),
    (0.5, [158, 154, 200]),
    (0.625, [128, 125, 186]),
    (0.75, [106, 81, 163]),
    (0.875, [84, 39, 143]),
    (1.0, [63, 0, 125]),
];

impl Colormap {
    fn stops(self) -> &'static [Stop] {
        match self {
            Colormap::HotReversed => HOT_REVERSED,
            Colormap::Purples => PURPLES,
        }
    }

    /// Colour at `t` in `[0, 1]`; values outside are clamped.
    pub fn sample(self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let upper = stops
            .iter()
            .position(|(pos, _)| *pos >= t)
            .unwrap_or(stops.len() - 1)
            .max(1);
        let (p0, c0) = stops[upper - 1];
        let (p1, c1) = stops[upper];
        let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
        RGBColor(mix(c0[0], c1[0]), mix(c0[1], c1[1]), mix(c0[2], c1[2]))
    }
}

/// A colormap clipped to a value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    map: Colormap,
    vmin: f64,
    vmax: f64,
}

impl ColorScale {
    pub fn new(map: Colormap, vmin: f64, vmax: f64) -> Self {
        Self { map, vmin, vmax }
    }

    pub fn colormap(&self) -> Colormap {
        self.map
    }

    pub fn vmin(&self) -> f64 {
        self.vmin
    }

    pub fn vmax(&self) -> f64 {
        self.vmax
    }

    /// Colour for `value`, or `None` for NaN.
    pub fn color(&self, value: f64) -> Option<RGBColor> {
        if value.is_nan() {
            return None;
        }
        let span = self.vmax - self.vmin;
        let t = if span > 0.0 {
            (value - self.vmin) / span
        } else {
            0.0
        };
        Some(self.map.sample(t))
    }

    /// Colour at fraction `t` of the range, as used for colour bars.
    pub fn color_at_fraction(&self, t: f64) -> RGBColor {
        self.map.sample(t)
    }
}
