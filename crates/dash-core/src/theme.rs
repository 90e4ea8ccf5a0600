// File: crates/dash-core/src/theme.rs
// Summary: Light/Dark theming for figure chrome plus named color scales for marks.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub caption: skia::Color,
    pub mark_outline: skia::Color,
    pub status_bar: skia::Color,
    pub status_text: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 235, 235, 245),
            caption: skia::Color::from_argb(255, 160, 160, 172),
            mark_outline: skia::Color::from_argb(255, 18, 18, 20),
            status_bar: skia::Color::from_argb(255, 28, 28, 32),
            status_text: skia::Color::from_argb(255, 210, 210, 220),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            title: skia::Color::from_argb(255, 20, 20, 30),
            caption: skia::Color::from_argb(255, 110, 110, 122),
            mark_outline: skia::Color::from_argb(255, 250, 250, 252),
            status_bar: skia::Color::from_argb(255, 236, 236, 240),
            status_text: skia::Color::from_argb(255, 40, 40, 50),
        }
    }
}

/// Return the built-in theme presets.
pub fn theme_presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find_theme(name: &str) -> Theme {
    for t in theme_presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::dark()
}

/// Named color scale for figure marks. Sequential scales interpolate their
/// stops over [0, 1]; qualitative scales index their stops directly.
#[derive(Clone, Copy, Debug)]
pub struct ColorScale {
    pub name: &'static str,
    stops: &'static [[u8; 3]],
    qualitative: bool,
}

// Sequential ramps in the spirit of the usual plotting palettes.
const SUNSET: &[[u8; 3]] = &[
    [75, 41, 145],
    [135, 44, 162],
    [192, 54, 157],
    [234, 79, 136],
    [250, 120, 118],
    [246, 169, 122],
    [237, 217, 163],
];
const PLASMA: &[[u8; 3]] = &[
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];
const VIRIDIS: &[[u8; 3]] = &[
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];
const RAINBOW: &[[u8; 3]] = &[
    [110, 64, 170],
    [50, 120, 230],
    [30, 200, 180],
    [120, 220, 70],
    [250, 200, 40],
    [240, 100, 60],
];
const SET1: &[[u8; 3]] = &[
    [228, 26, 28],
    [55, 126, 184],
    [77, 175, 74],
    [152, 78, 163],
    [255, 127, 0],
    [255, 217, 47],
    [166, 86, 40],
    [247, 129, 191],
];

impl ColorScale {
    pub const fn sunset() -> Self { Self { name: "sunset", stops: SUNSET, qualitative: false } }
    pub const fn plasma() -> Self { Self { name: "plasma", stops: PLASMA, qualitative: false } }
    pub const fn viridis() -> Self { Self { name: "viridis", stops: VIRIDIS, qualitative: false } }
    pub const fn rainbow() -> Self { Self { name: "rainbow", stops: RAINBOW, qualitative: false } }
    pub const fn set1() -> Self { Self { name: "set1", stops: SET1, qualitative: true } }

    pub const fn is_qualitative(&self) -> bool { self.qualitative }

    /// Sample the scale at `t` in [0, 1] (clamped). Qualitative scales treat
    /// `t` as a fractional index over their stops.
    pub fn color_at(&self, t: f32) -> skia::Color {
        let t = t.clamp(0.0, 1.0);
        let last = self.stops.len() - 1;
        if self.qualitative {
            let i = ((t * last as f32).round() as usize).min(last);
            let [r, g, b] = self.stops[i];
            return skia::Color::from_argb(255, r, g, b);
        }
        let pos = t * last as f32;
        let i = (pos.floor() as usize).min(last.saturating_sub(1));
        let frac = pos - i as f32;
        let a = self.stops[i];
        let b = self.stops[i + 1];
        let lerp = |x: u8, y: u8| -> u8 {
            (x as f32 + (y as f32 - x as f32) * frac).round() as u8
        };
        skia::Color::from_argb(255, lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2]))
    }

    /// Color for the `i`-th of `n` marks. Qualitative scales cycle their
    /// stops; sequential scales spread marks evenly over the ramp.
    pub fn pick(&self, i: usize, n: usize) -> skia::Color {
        if self.qualitative {
            let [r, g, b] = self.stops[i % self.stops.len()];
            return skia::Color::from_argb(255, r, g, b);
        }
        if n <= 1 {
            return self.color_at(0.5);
        }
        self.color_at(i as f32 / (n - 1) as f32)
    }
}

/// Return the built-in color scale presets.
pub fn scale_presets() -> Vec<ColorScale> {
    vec![
        ColorScale::sunset(),
        ColorScale::plasma(),
        ColorScale::viridis(),
        ColorScale::rainbow(),
        ColorScale::set1(),
    ]
}

/// Find a color scale by its `name`, falling back to sunset.
pub fn find_scale(name: &str) -> ColorScale {
    for s in scale_presets() { if s.name.eq_ignore_ascii_case(name) { return s; } }
    ColorScale::sunset()
}
