// File: crates/dash-core/src/figure.rs
// Summary: Figure model and headless rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::axis::Axis;
use crate::geo;
use crate::geometry::RectI32;
use crate::grid::{fmt_tick, linspace, truncate_label};
use crate::query::DerivedTable;
use crate::text::TextShaper;
use crate::theme::{ColorScale, Theme};
use crate::types::{Insets, HEIGHT, WIDTH};

/// How a derived table is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FigureKind {
    /// One rect per group. Horizontal bars run left-to-right with the
    /// category labels in the left gutter.
    Bar { horizontal: bool },
    /// Value-proportional slices with outside labels.
    Pie,
    /// Shaded tile per country at its map position.
    Choropleth,
    /// Value-sized bubble per country at its map position.
    ScatterGeo,
}

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub draw_labels: bool,
    /// Optional one-line footer (page/selection summary) drawn by the shells.
    pub status_line: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            status_line: None,
        }
    }
}

/// One chart: a derived table bound to a kind, a title, a value axis, and a
/// color scale. Consumed by exactly one rendering call per recompute.
pub struct Figure {
    pub title: String,
    pub kind: FigureKind,
    pub table: DerivedTable,
    pub axis: Axis,
    pub scale: ColorScale,
}

impl Figure {
    pub fn new(title: impl Into<String>, kind: FigureKind, table: DerivedTable, scale: ColorScale) -> Self {
        let axis = Axis::for_table(&table);
        Self { title: title.into(), kind, table, axis, scale }
    }

    /// Render to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let data = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(())
    }

    /// Render and return encoded PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        encode_png(&mut surface)
    }

    /// Render and return (RGBA bytes, width, height, row stride) for blitting.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts)?;
        read_rgba8(&mut surface)
    }

    fn render_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        let shaper = TextShaper::new();
        let plot = plot_rect(opts);

        if opts.draw_labels {
            shaper.draw_left(canvas, &self.title, plot.left as f32, 28.0, 17.0, theme.title, false);
        }

        if self.table.is_empty() {
            draw_frame(canvas, plot, theme);
            draw_empty_caption(canvas, plot, theme, &shaper);
        } else {
            match self.kind {
                FigureKind::Bar { horizontal } => {
                    draw_frame(canvas, plot, theme);
                    draw_bar_marks(canvas, plot, self, horizontal, theme, &shaper, opts.draw_labels);
                }
                FigureKind::Pie => draw_pie_marks(canvas, plot, self, theme, &shaper, opts.draw_labels),
                FigureKind::Choropleth => draw_geo_marks(canvas, plot, self, false, theme, &shaper, opts.draw_labels),
                FigureKind::ScatterGeo => draw_geo_marks(canvas, plot, self, true, theme, &shaper, opts.draw_labels),
            }
        }

        if let Some(status) = &opts.status_line {
            draw_status_bar(canvas, opts, status, &shaper);
        }
    }
}

/// Render a figure-less panel (page intro text) with the same chrome.
pub fn render_text_panel(
    title: &str,
    lines: &[&str],
    opts: &RenderOptions,
) -> Result<(Vec<u8>, u32, u32, usize)> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    let theme = &opts.theme;
    canvas.clear(theme.background);

    let shaper = TextShaper::new();
    let left = opts.insets.left as f32;
    shaper.draw_left(canvas, title, left, 28.0, 17.0, theme.title, false);
    let mut y = opts.insets.top as f32 + 26.0;
    for line in lines {
        shaper.draw_left(canvas, line, left, y, 14.0, theme.axis_label, false);
        y += 24.0;
    }
    if let Some(status) = &opts.status_line {
        draw_status_bar(canvas, opts, status, &shaper);
    }
    read_rgba8(&mut surface)
}

// ---- helpers ----------------------------------------------------------------

fn plot_rect(opts: &RenderOptions) -> RectI32 {
    RectI32::from_ltrb(
        opts.insets.left as i32,
        opts.insets.top as i32,
        opts.width - opts.insets.right as i32,
        opts.height - opts.insets.bottom as i32,
    )
}

fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn read_rgba8(surface: &mut skia::Surface) -> Result<(Vec<u8>, u32, u32, usize)> {
    let image = surface.image_snapshot();
    let w = image.width();
    let h = image.height();
    let stride = w as usize * 4;
    let info = skia::ImageInfo::new(
        (w, h),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let mut pixels = vec![0u8; stride * h as usize];
    if !image.read_pixels(&info, &mut pixels, stride, (0, 0), skia::image::CachingHint::Allow) {
        anyhow::bail!("read RGBA pixels failed");
    }
    Ok((pixels, w as u32, h as u32, stride))
}

fn draw_frame(canvas: &skia::Canvas, plot: RectI32, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    // verticals
    for x in linspace(plot.left as f64, plot.right as f64, 10) {
        canvas.draw_line((x as f32, plot.top as f32), (x as f32, plot.bottom as f32), &paint);
    }
    // horizontals
    for y in linspace(plot.top as f64, plot.bottom as f64, 6) {
        canvas.draw_line((plot.left as f32, y as f32), (plot.right as f32, y as f32), &paint);
    }

    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);
    canvas.draw_line(
        (plot.left as f32, plot.bottom as f32),
        (plot.right as f32, plot.bottom as f32),
        &axis_paint,
    );
    canvas.draw_line(
        (plot.left as f32, plot.top as f32),
        (plot.left as f32, plot.bottom as f32),
        &axis_paint,
    );
}

fn draw_empty_caption(canvas: &skia::Canvas, plot: RectI32, theme: &Theme, shaper: &TextShaper) {
    let cx = (plot.left + plot.width() / 2) as f32;
    let cy = (plot.top + plot.height() / 2) as f32;
    shaper.draw_center(canvas, "No listings match the current selection.", cx, cy, 15.0, theme.caption, false);
}

fn draw_status_bar(canvas: &skia::Canvas, opts: &RenderOptions, status: &str, shaper: &TextShaper) {
    let theme = &opts.theme;
    let h = 26.0f32;
    let mut paint = skia::Paint::default();
    paint.set_color(theme.status_bar);
    let rect = skia::Rect::from_ltrb(0.0, opts.height as f32 - h, opts.width as f32, opts.height as f32);
    canvas.draw_rect(rect, &paint);
    shaper.draw_left(canvas, status, 10.0, opts.height as f32 - 8.0, 13.0, theme.status_text, true);
}

/// Value ticks along the value axis (Y for vertical bars, X for horizontal).
fn draw_value_ticks(
    canvas: &skia::Canvas,
    plot: RectI32,
    axis: &Axis,
    horizontal: bool,
    theme: &Theme,
    shaper: &TextShaper,
) {
    for v in linspace(axis.min, axis.max, 6) {
        let label = fmt_tick(v);
        if horizontal {
            let t = (v - axis.min) / (axis.max - axis.min).max(1e-9);
            let x = plot.left as f32 + t as f32 * plot.width() as f32;
            shaper.draw_center(canvas, &label, x, plot.bottom as f32 + 18.0, 12.0, theme.tick, true);
        } else {
            let t = (v - axis.min) / (axis.max - axis.min).max(1e-9);
            let y = plot.bottom as f32 - t as f32 * plot.height() as f32;
            shaper.draw_right(canvas, &label, plot.left as f32 - 8.0, y + 4.0, 12.0, theme.tick, true);
        }
    }
    let label_x = if horizontal { (plot.left + plot.width() / 2) as f32 } else { plot.left as f32 - 64.0 };
    let label_y = if horizontal { plot.bottom as f32 + 40.0 } else { plot.top as f32 - 10.0 };
    shaper.draw_left(canvas, &axis.label, label_x, label_y, 13.0, theme.axis_label, false);
}

fn draw_bar_marks(
    canvas: &skia::Canvas,
    plot: RectI32,
    figure: &Figure,
    horizontal: bool,
    theme: &Theme,
    shaper: &TextShaper,
    labels: bool,
) {
    let table = &figure.table;
    let axis = &figure.axis;
    let n = table.len();
    let span = (axis.max - axis.min).max(1e-9);
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);

    if labels {
        draw_value_ticks(canvas, plot, axis, horizontal, theme, shaper);
    }

    if horizontal {
        let slot = plot.height() as f32 / n as f32;
        let bar = (slot * 0.7).max(2.0);
        for (i, g) in table.groups.iter().enumerate() {
            let t = ((g.value - axis.min) / span).clamp(0.0, 1.0);
            let x1 = plot.left as f32 + t as f32 * plot.width() as f32;
            let cy = plot.top as f32 + (i as f32 + 0.5) * slot;
            fill.set_color(bar_color(figure, i, n, t as f32));
            let rect = skia::Rect::from_ltrb(plot.left as f32, cy - bar * 0.5, x1.max(plot.left as f32 + 1.0), cy + bar * 0.5);
            canvas.draw_rect(rect, &fill);
            if labels {
                let key = truncate_label(&g.key, 16);
                shaper.draw_right(canvas, &key, plot.left as f32 - 8.0, cy + 4.0, 12.0, theme.axis_label, false);
            }
        }
    } else {
        let slot = plot.width() as f32 / n as f32;
        let bar = (slot * 0.7).max(2.0);
        // Thin out category labels when slots get narrow.
        let every = if slot >= 46.0 { 1 } else { ((46.0 / slot).ceil() as usize).max(1) };
        for (i, g) in table.groups.iter().enumerate() {
            let t = ((g.value - axis.min) / span).clamp(0.0, 1.0);
            let y1 = plot.bottom as f32 - t as f32 * plot.height() as f32;
            let cx = plot.left as f32 + (i as f32 + 0.5) * slot;
            fill.set_color(bar_color(figure, i, n, t as f32));
            let rect = skia::Rect::from_ltrb(cx - bar * 0.5, y1.min(plot.bottom as f32 - 1.0), cx + bar * 0.5, plot.bottom as f32);
            canvas.draw_rect(rect, &fill);
            if labels && i % every == 0 {
                let key = truncate_label(&g.key, 12);
                shaper.draw_center(canvas, &key, cx, plot.bottom as f32 + 34.0, 12.0, theme.axis_label, false);
            }
        }
    }
}

/// Sequential scales shade bars by normalized value; qualitative scales color
/// them per category.
fn bar_color(figure: &Figure, i: usize, n: usize, t: f32) -> skia::Color {
    if figure.scale.is_qualitative() {
        figure.scale.pick(i, n)
    } else {
        figure.scale.color_at(t)
    }
}

fn draw_pie_marks(
    canvas: &skia::Canvas,
    plot: RectI32,
    figure: &Figure,
    theme: &Theme,
    shaper: &TextShaper,
    labels: bool,
) {
    let table = &figure.table;
    let total: f64 = table.groups.iter().map(|g| g.value.max(0.0)).sum();
    if total <= 0.0 {
        draw_frame(canvas, plot, theme);
        draw_empty_caption(canvas, plot, theme, shaper);
        return;
    }

    // Leave room for outside labels around the disc.
    let square = plot.center_square();
    let margin = (square.width() as f32 * 0.14).max(24.0);
    let oval = skia::Rect::from_ltrb(
        square.left as f32 + margin,
        square.top as f32 + margin,
        square.right as f32 - margin,
        square.bottom as f32 - margin,
    );
    let cx = (oval.left + oval.right) * 0.5;
    let cy = (oval.top + oval.bottom) * 0.5;
    let radius = (oval.right - oval.left) * 0.5;

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    let mut outline = skia::Paint::default();
    outline.set_anti_alias(true);
    outline.set_style(skia::paint::Style::Stroke);
    outline.set_stroke_width(2.0);
    outline.set_color(theme.mark_outline);

    let n = table.len();
    let mut start = -90.0f32;
    for (i, g) in table.groups.iter().enumerate() {
        let sweep = (g.value.max(0.0) / total * 360.0) as f32;
        fill.set_color(figure.scale.pick(i, n));
        canvas.draw_arc(oval, start, sweep, true, &fill);
        canvas.draw_arc(oval, start, sweep, true, &outline);

        if labels && sweep > 1.0 {
            let mid = (start + sweep * 0.5).to_radians();
            let lx = cx + mid.cos() * radius * 1.12;
            let ly = cy + mid.sin() * radius * 1.12;
            let text = format!("{} ({})", truncate_label(&g.key, 14), fmt_tick(g.value));
            if mid.cos() >= 0.0 {
                shaper.draw_left(canvas, &text, lx, ly, 12.0, theme.axis_label, false);
            } else {
                shaper.draw_right(canvas, &text, lx, ly, 12.0, theme.axis_label, false);
            }
        }
        start += sweep;
    }
}

fn draw_geo_marks(
    canvas: &skia::Canvas,
    plot: RectI32,
    figure: &Figure,
    sized_bubbles: bool,
    theme: &Theme,
    shaper: &TextShaper,
    labels: bool,
) {
    let table = &figure.table;

    // Graticule behind the marks.
    let mut grat = skia::Paint::default();
    grat.set_color(theme.grid);
    grat.set_anti_alias(true);
    grat.set_stroke_width(1.0);
    for lon in (-180..=180).step_by(60) {
        let (x, y0) = geo::project(90.0, lon as f64, plot);
        let (_, y1) = geo::project(-90.0, lon as f64, plot);
        canvas.draw_line((x, y0), (x, y1), &grat);
    }
    for lat in (-90..=90).step_by(30) {
        let (x0, y) = geo::project(lat as f64, -180.0, plot);
        let (x1, _) = geo::project(lat as f64, 180.0, plot);
        canvas.draw_line((x0, y), (x1, y), &grat);
    }

    let max = table.max_value().max(1e-9);
    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_style(skia::paint::Style::Fill);
    let mut outline = skia::Paint::default();
    outline.set_anti_alias(true);
    outline.set_style(skia::paint::Style::Stroke);
    outline.set_stroke_width(1.5);
    outline.set_color(theme.mark_outline);

    let mut unplaced = 0usize;
    for g in &table.groups {
        let Some((lat, lon)) = geo::centroid(&g.key) else {
            unplaced += 1;
            continue;
        };
        let (x, y) = geo::project(lat, lon, plot);
        let t = (g.value / max) as f32;
        fill.set_color(figure.scale.color_at(t));
        if sized_bubbles {
            let r = 6.0 + 20.0 * t.sqrt();
            canvas.draw_circle((x, y), r, &fill);
            canvas.draw_circle((x, y), r, &outline);
        } else {
            let half = 14.0;
            let rect = skia::Rect::from_ltrb(x - half, y - half, x + half, y + half);
            canvas.draw_rect(rect, &fill);
            canvas.draw_rect(rect, &outline);
        }
        if labels {
            let text = format!("{} {}", truncate_label(&g.key, 14), fmt_tick(g.value));
            shaper.draw_center(canvas, &text, x, y + 32.0, 11.0, theme.axis_label, false);
        }
    }

    if labels && unplaced > 0 {
        let note = format!("{unplaced} of {} countries have no map position", table.len());
        shaper.draw_left(canvas, &note, plot.left as f32, plot.bottom as f32 + 18.0, 12.0, theme.caption, false);
    }
}
