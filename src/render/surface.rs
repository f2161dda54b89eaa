//! The host drawing surface contract.
//!
//! [`Surface`] abstracts the immediate-mode 2D context the session paints
//! into: path construction, fill/stroke, clipping, gradients, text, and the
//! pixel read-back that the hit canvas relies on. Hosts (a web canvas, a GPU
//! layer, the bundled [`RasterSurface`](super::RasterSurface)) implement it;
//! widgets never see anything else.

use crate::geometry::Bounds;
use crate::property::{Color, Font};

// ---------------------------------------------------------------------------
// Paint state types
// ---------------------------------------------------------------------------

/// A linear gradient between two anchor points.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    stops: Vec<(f64, Color)>,
}

impl Gradient {
    /// Create a gradient along the line `(x0,y0)` → `(x1,y1)`.
    pub fn linear(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1, stops: Vec::new() }
    }

    /// Add a color stop at `offset` in `[0, 1]` (builder).
    pub fn stop(mut self, offset: f64, color: Color) -> Self {
        self.stops.push((offset, color));
        self
    }

    /// The registered color stops, in insertion order.
    pub fn stops(&self) -> &[(f64, Color)] {
        &self.stops
    }
}

/// Fill paint: a flat color or a gradient.
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Solid(Color),
    Linear(Gradient),
}

/// Horizontal anchoring for text drawing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Vertical anchoring for text drawing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// An immediate-mode 2D drawing surface.
///
/// The contract mirrors a canvas context: stateful paint attributes, a
/// current path, and primitive fill/stroke calls. `resize` is observably
/// expensive for real backends, so the session only calls it when the host
/// size actually changed.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resize the backing store. Contents are reset.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    // -- paint state

    fn set_global_alpha(&mut self, alpha: f64);
    fn set_fill_style(&mut self, style: FillStyle);
    fn set_stroke_style(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    /// Dash pattern for strokes; an empty slice means solid.
    fn set_line_dash(&mut self, dash: &[f64]);
    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    // -- rectangles

    fn fill_rect(&mut self, bounds: Bounds);
    fn stroke_rect(&mut self, bounds: Bounds);

    // -- path construction

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn rect(&mut self, bounds: Bounds);
    fn round_rect(&mut self, bounds: Bounds, rx: f64, ry: f64);
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);

    // -- clip stack

    fn save(&mut self);
    fn restore(&mut self);
    /// Intersect the clip with the current path's extent.
    fn clip(&mut self);

    // -- text

    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn measure_text(&self, text: &str) -> f64;

    // -- pixel read-back (hit canvas resolution)

    fn read_pixel(&self, x: u32, y: u32) -> Color;
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_builder_keeps_stop_order() {
        let g = Gradient::linear(0.0, 0.0, 0.0, 10.0)
            .stop(0.0, Color::WHITE)
            .stop(1.0, Color::BLACK);
        assert_eq!(g.stops().len(), 2);
        assert_eq!(g.stops()[0], (0.0, Color::WHITE));
        assert_eq!(g.stops()[1], (1.0, Color::BLACK));
    }

    #[test]
    fn fill_style_equality() {
        assert_eq!(
            FillStyle::Solid(Color::GRAY),
            FillStyle::Solid(Color::GRAY)
        );
        assert_ne!(
            FillStyle::Solid(Color::GRAY),
            FillStyle::Solid(Color::BLACK)
        );
    }
}
