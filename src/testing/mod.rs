//! Headless helpers for exercising the renderer in tests.
//!
//! [`RecordingSurface`] wraps the software raster backend and keeps a log of
//! the drawing calls made against it, so tests can assert on what was drawn
//! (notably text, which the raster backend does not legibly rasterize).
//! [`RecordingPvSource`] captures the subscribe/write traffic an engine sends
//! to its control-system source.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Bounds;
use crate::property::{Color, Font};
use crate::pv::{BindingError, PvSource, PvValue};
use crate::render::surface::{FillStyle, Surface, TextAlign, TextBaseline};
use crate::render::RasterSurface;

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// A drawing call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    FillRect(Bounds),
    StrokeRect(Bounds),
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

/// A [`Surface`] that paints into a raster backend while logging every
/// drawing call for later inspection.
pub struct RecordingSurface {
    inner: RasterSurface,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { inner: RasterSurface::new(width, height), ops: Vec::new() }
    }

    /// Every drawing call recorded so far, in issue order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The strings passed to `fill_text`, in draw order.
    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear_log(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.inner.resize(width, height);
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
        self.inner.clear();
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.inner.set_global_alpha(alpha);
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.inner.set_fill_style(style);
    }

    fn set_stroke_style(&mut self, color: Color) {
        self.inner.set_stroke_style(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.inner.set_line_width(width);
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.inner.set_line_dash(dash);
    }

    fn set_font(&mut self, font: &Font) {
        self.inner.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.inner.set_text_align(align);
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.inner.set_text_baseline(baseline);
    }

    fn fill_rect(&mut self, bounds: Bounds) {
        self.ops.push(DrawOp::FillRect(bounds));
        self.inner.fill_rect(bounds);
    }

    fn stroke_rect(&mut self, bounds: Bounds) {
        self.ops.push(DrawOp::StrokeRect(bounds));
        self.inner.stroke_rect(bounds);
    }

    fn begin_path(&mut self) {
        self.inner.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.inner.line_to(x, y);
    }

    fn rect(&mut self, bounds: Bounds) {
        self.inner.rect(bounds);
    }

    fn round_rect(&mut self, bounds: Bounds, rx: f64, ry: f64) {
        self.inner.round_rect(bounds, rx, ry);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) {
        self.inner.ellipse(cx, cy, rx, ry);
    }

    fn close_path(&mut self) {
        self.inner.close_path();
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
        self.inner.fill();
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
        self.inner.stroke();
    }

    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        self.inner.restore();
    }

    fn clip(&mut self) {
        self.inner.clip();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText { text: text.to_owned(), x, y });
        self.inner.fill_text(text, x, y);
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.inner.measure_text(text)
    }

    fn read_pixel(&self, x: u32, y: u32) -> Color {
        self.inner.read_pixel(x, y)
    }
}

// ---------------------------------------------------------------------------
// RecordingPvSource
// ---------------------------------------------------------------------------

/// The traffic a [`RecordingPvSource`] has seen.
#[derive(Default)]
pub struct PvTraffic {
    pub subscribed: Vec<String>,
    pub unsubscribed: Vec<String>,
    pub writes: Vec<(String, PvValue)>,
}

/// A [`PvSource`] that records every call so tests can assert on the
/// outbound control-system traffic. Clone the handle before boxing the
/// source into an engine.
#[derive(Clone, Default)]
pub struct RecordingPvSource {
    traffic: Rc<RefCell<PvTraffic>>,
}

impl RecordingPvSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle onto the recorded traffic.
    pub fn traffic(&self) -> Rc<RefCell<PvTraffic>> {
        Rc::clone(&self.traffic)
    }
}

impl PvSource for RecordingPvSource {
    fn subscribe(&mut self, name: &str) {
        self.traffic.borrow_mut().subscribed.push(name.to_owned());
    }

    fn unsubscribe(&mut self, name: &str) {
        self.traffic.borrow_mut().unsubscribed.push(name.to_owned());
    }

    fn write(&mut self, name: &str, value: &PvValue) -> Result<(), BindingError> {
        self.traffic.borrow_mut().writes.push((name.to_owned(), value.clone()));
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_surface_logs_and_paints() {
        let mut g = RecordingSurface::new(10, 10);
        g.set_fill_style(FillStyle::Solid(Color::new(1, 2, 3)));
        g.fill_rect(Bounds::new(0.0, 0.0, 10.0, 10.0));
        g.fill_text("hi", 1.0, 1.0);

        assert_eq!(g.read_pixel(5, 5), Color::new(1, 2, 3));
        assert_eq!(g.texts(), vec!["hi".to_owned()]);
        assert_eq!(g.ops().len(), 2);
    }

    #[test]
    fn recording_source_captures_writes() {
        let source = RecordingPvSource::new();
        let traffic = source.traffic();

        let mut boxed: Box<dyn PvSource> = Box::new(source);
        boxed.subscribe("a");
        boxed.write("a", &PvValue::Num(1.0)).unwrap();

        let seen = traffic.borrow();
        assert_eq!(seen.subscribed, vec!["a".to_owned()]);
        assert_eq!(seen.writes, vec![("a".to_owned(), PvValue::Num(1.0))]);
    }
}
