//! Software raster surface.
//!
//! A flat-color scanline rasterizer implementing [`Surface`]. It backs the
//! hit canvas (which only ever needs opaque flat fills and exact pixel
//! read-back) and doubles as a headless surface for tests. Deliberate
//! approximations, acceptable for both uses: gradients flatten to their
//! first stop, rounded corners rasterize square, text paints nothing, and
//! text metrics are estimated from the font size.

use crate::geometry::{Bounds, Point};
use crate::property::{Color, Font};

use super::surface::{FillStyle, Surface, TextAlign, TextBaseline};

/// Average glyph advance as a fraction of the font size, used for the
/// estimated text metrics.
const GLYPH_ADVANCE: f64 = 0.6;

// ---------------------------------------------------------------------------
// RasterSurface
// ---------------------------------------------------------------------------

/// An in-memory pixel surface with canvas-like path semantics.
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,

    // paint state
    fill: FillStyle,
    stroke: Color,
    line_width: f64,
    alpha: f64,
    clip: Option<Bounds>,
    align: TextAlign,
    baseline: TextBaseline,
    font: Font,

    // current path: a list of subpaths in absolute coordinates
    subpaths: Vec<Vec<Point>>,

    saved: Vec<SavedState>,
}

#[derive(Clone)]
struct SavedState {
    fill: FillStyle,
    stroke: Color,
    line_width: f64,
    alpha: f64,
    clip: Option<Bounds>,
}

impl RasterSurface {
    /// Create a transparent surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; (width * height) as usize],
            fill: FillStyle::Solid(Color::BLACK),
            stroke: Color::BLACK,
            line_width: 1.0,
            alpha: 1.0,
            clip: None,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            font: Font::default(),
            subpaths: Vec::new(),
            saved: Vec::new(),
        }
    }

    fn flat_fill_color(&self) -> Color {
        match &self.fill {
            FillStyle::Solid(c) => *c,
            FillStyle::Linear(g) => g.stops().first().map(|(_, c)| *c).unwrap_or(Color::BLACK),
        }
    }

    fn clip_bounds(&self) -> Bounds {
        let canvas = Bounds::new(0.0, 0.0, self.width as f64, self.height as f64);
        match self.clip {
            Some(c) => canvas.intersection(c),
            None => canvas,
        }
    }

    fn put(&mut self, x: i64, y: i64, color: Color, clip: Bounds) {
        if x < 0 || y < 0 {
            return;
        }
        if !clip.contains(x as f64 + 0.5, y as f64 + 0.5) {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    /// Even-odd scanline fill of a single polygon.
    fn fill_polygon(&mut self, polygon: &[Point], color: Color) {
        // Pixels are replaced, not blended; a fully transparent paint is a
        // no-op, as it would be under source-over compositing.
        if polygon.len() < 3 || color.is_transparent() {
            return;
        }
        let clip = self.clip_bounds();
        let y_min = polygon.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_max = polygon.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let y0 = y_min.floor().max(clip.y) as i64;
        let y1 = y_max.ceil().min(clip.bottom()) as i64;

        for y in y0..y1 {
            let scan = y as f64 + 0.5;
            let mut crossings = Vec::new();
            for i in 0..polygon.len() {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks(2) {
                if let [x_start, x_end] = pair {
                    let from = x_start.round() as i64;
                    let to = x_end.round() as i64;
                    for x in from..to {
                        self.put(x, y, color, clip);
                    }
                }
            }
        }
    }

    /// Paint a segment as a filled quad of `width` thickness.
    fn fill_segment(&mut self, a: Point, b: Point, width: f64, color: Color) {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let half = (width / 2.0).max(0.5);
        let nx = -dy / len * half;
        let ny = dx / len * half;
        let quad = [
            Point::new(a.x + nx, a.y + ny),
            Point::new(b.x + nx, b.y + ny),
            Point::new(b.x - nx, b.y - ny),
            Point::new(a.x - nx, a.y - ny),
        ];
        self.fill_polygon(&quad, color);
    }

    fn rect_polygon(bounds: Bounds) -> Vec<Point> {
        vec![
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.right(), bounds.bottom()),
            Point::new(bounds.x, bounds.bottom()),
        ]
    }

    fn ellipse_polygon(cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<Point> {
        const SEGMENTS: usize = 64;
        (0..SEGMENTS)
            .map(|i| {
                let t = i as f64 / SEGMENTS as f64 * std::f64::consts::TAU;
                Point::new(cx + rx * t.cos(), cy + ry * t.sin())
            })
            .collect()
    }

    /// Bounding box of the current path, used by the rectangular clip model.
    fn path_extent(&self) -> Option<Bounds> {
        let points: Vec<&Point> = self.subpaths.iter().flatten().collect();
        let first = points.first()?;
        let mut min = **first;
        let mut max = **first;
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::TRANSPARENT; (width * height) as usize];
    }

    fn clear(&mut self) {
        self.pixels.fill(Color::TRANSPARENT);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.fill = style;
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_dash(&mut self, _dash: &[f64]) {
        // Dashes rasterize solid; irrelevant for picking and tests.
    }

    fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.baseline = baseline;
    }

    fn fill_rect(&mut self, bounds: Bounds) {
        if self.alpha <= 0.0 {
            return;
        }
        let color = self.flat_fill_color();
        self.fill_polygon(&Self::rect_polygon(bounds), color);
    }

    fn stroke_rect(&mut self, bounds: Bounds) {
        if self.alpha <= 0.0 {
            return;
        }
        let (color, width) = (self.stroke, self.line_width);
        let corners = Self::rect_polygon(bounds);
        for i in 0..4 {
            self.fill_segment(corners[i], corners[(i + 1) % 4], width, color);
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![Point::new(x, y)]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.subpaths.last_mut() {
            Some(sub) => sub.push(Point::new(x, y)),
            None => self.subpaths.push(vec![Point::new(x, y)]),
        }
    }

    fn rect(&mut self, bounds: Bounds) {
        self.subpaths.push(Self::rect_polygon(bounds));
    }

    fn round_rect(&mut self, bounds: Bounds, _rx: f64, _ry: f64) {
        // Corners rasterize square.
        self.subpaths.push(Self::rect_polygon(bounds));
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.subpaths.push(Self::ellipse_polygon(cx, cy, rx, ry));
    }

    fn close_path(&mut self) {
        // Subpaths are filled implicitly closed; nothing to record.
    }

    fn fill(&mut self) {
        if self.alpha <= 0.0 {
            return;
        }
        let color = self.flat_fill_color();
        let subpaths = std::mem::take(&mut self.subpaths);
        for sub in &subpaths {
            self.fill_polygon(sub, color);
        }
        self.subpaths = subpaths;
    }

    fn stroke(&mut self) {
        if self.alpha <= 0.0 {
            return;
        }
        let (color, width) = (self.stroke, self.line_width);
        let subpaths = std::mem::take(&mut self.subpaths);
        for sub in &subpaths {
            for pair in sub.windows(2) {
                self.fill_segment(pair[0], pair[1], width, color);
            }
        }
        self.subpaths = subpaths;
    }

    fn save(&mut self) {
        self.saved.push(SavedState {
            fill: self.fill.clone(),
            stroke: self.stroke,
            line_width: self.line_width,
            alpha: self.alpha,
            clip: self.clip,
        });
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.fill = state.fill;
            self.stroke = state.stroke;
            self.line_width = state.line_width;
            self.alpha = state.alpha;
            self.clip = state.clip;
        }
    }

    fn clip(&mut self) {
        if let Some(extent) = self.path_extent() {
            self.clip = Some(match self.clip {
                Some(existing) => existing.intersection(extent),
                None => extent,
            });
        }
    }

    fn fill_text(&mut self, _text: &str, _x: f64, _y: f64) {
        // Glyphs are the host's concern; the raster fallback paints none.
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font.size * GLYPH_ADVANCE
    }

    fn read_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Color::TRANSPARENT
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_paints_inside_only() {
        let mut s = RasterSurface::new(20, 20);
        s.set_fill_style(FillStyle::Solid(Color::new(255, 0, 0)));
        s.fill_rect(Bounds::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(s.read_pixel(10, 10), Color::new(255, 0, 0));
        assert_eq!(s.read_pixel(2, 2), Color::TRANSPARENT);
        assert_eq!(s.read_pixel(16, 10), Color::TRANSPARENT);
    }

    #[test]
    fn polygon_fill_respects_shape() {
        let mut s = RasterSurface::new(20, 20);
        s.set_fill_style(FillStyle::Solid(Color::BLACK));
        s.begin_path();
        s.move_to(0.0, 0.0);
        s.line_to(20.0, 0.0);
        s.line_to(0.0, 20.0);
        s.close_path();
        s.fill();
        // Upper-left triangle is painted, lower-right is not.
        assert_eq!(s.read_pixel(2, 2), Color::BLACK);
        assert_eq!(s.read_pixel(18, 18), Color::TRANSPARENT);
    }

    #[test]
    fn ellipse_fill_hits_center_not_corner() {
        let mut s = RasterSurface::new(40, 40);
        s.set_fill_style(FillStyle::Solid(Color::GRAY));
        s.begin_path();
        s.ellipse(20.0, 20.0, 15.0, 10.0);
        s.fill();
        assert_eq!(s.read_pixel(20, 20), Color::GRAY);
        assert_eq!(s.read_pixel(6, 11), Color::TRANSPARENT);
    }

    #[test]
    fn zero_alpha_paints_nothing() {
        let mut s = RasterSurface::new(10, 10);
        s.set_global_alpha(0.0);
        s.set_fill_style(FillStyle::Solid(Color::BLACK));
        s.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.read_pixel(5, 5), Color::TRANSPARENT);
    }

    #[test]
    fn clip_limits_painting() {
        let mut s = RasterSurface::new(20, 20);
        s.save();
        s.begin_path();
        s.rect(Bounds::new(0.0, 0.0, 10.0, 20.0));
        s.clip();
        s.set_fill_style(FillStyle::Solid(Color::BLACK));
        s.fill_rect(Bounds::new(0.0, 0.0, 20.0, 20.0));
        s.restore();
        assert_eq!(s.read_pixel(5, 5), Color::BLACK);
        assert_eq!(s.read_pixel(15, 5), Color::TRANSPARENT);

        // Clip no longer applies after restore.
        s.fill_rect(Bounds::new(14.0, 0.0, 4.0, 4.0));
        assert_eq!(s.read_pixel(15, 2), Color::BLACK);
    }

    #[test]
    fn gradient_flattens_to_first_stop() {
        use super::super::surface::Gradient;
        let mut s = RasterSurface::new(10, 10);
        let g = Gradient::linear(0.0, 0.0, 0.0, 10.0)
            .stop(0.0, Color::WHITE)
            .stop(1.0, Color::BLACK);
        s.set_fill_style(FillStyle::Linear(g));
        s.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.read_pixel(5, 5), Color::WHITE);
    }

    #[test]
    fn resize_resets_contents() {
        let mut s = RasterSurface::new(10, 10);
        s.set_fill_style(FillStyle::Solid(Color::BLACK));
        s.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0));
        s.resize(12, 12);
        assert_eq!(s.width(), 12);
        assert_eq!(s.read_pixel(5, 5), Color::TRANSPARENT);
    }

    #[test]
    fn out_of_bounds_read_is_transparent() {
        let s = RasterSurface::new(10, 10);
        assert_eq!(s.read_pixel(100, 100), Color::TRANSPARENT);
    }

    #[test]
    fn measured_text_scales_with_font_size() {
        let mut s = RasterSurface::new(10, 10);
        s.set_font(&Font::new("Arial", 10.0));
        let narrow = s.measure_text("abc");
        s.set_font(&Font::new("Arial", 20.0));
        let wide = s.measure_text("abc");
        assert!(wide > narrow);
    }
}
