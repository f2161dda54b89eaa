//! Polyline shape widget.

use crate::geometry::{translate_points, Bounds, Point};
use crate::property::{Property, PropValue};
use crate::render::surface::Surface;
use crate::widget::{DrawContext, RenderError, WidgetCore, WidgetKind};

use super::rectangle::fill_fraction;

/// An open stroked path with absolute vertex coordinates.
///
/// The line takes the widget background color; the fill level re-strokes
/// the leading fraction in the foreground color. The point list translates
/// with `x`/`y` moves, like [`Polygon`](super::Polygon).
pub struct Polyline;

fn trace(g: &mut dyn Surface, points: &[Point]) {
    g.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            g.move_to(p.x, p.y);
        } else {
            g.line_to(p.x, p.y);
        }
    }
}

impl WidgetKind for Polyline {
    fn declare(&self, core: &mut WidgetCore) {
        core.props.add(Property::int("alpha", 255));
        core.props.add(Property::int("line_width", 0));
        core.props.add(Property::float("fill_level", 0.0));
        core.props.add(Property::bool("horizontal_fill", false));
        core.props.add(Property::points("points", Vec::new()));
    }

    fn init(&mut self, core: &mut WidgetCore) {
        core.props.listen("x", |props, new, old| {
            let dx = (new.as_int() - old.as_int()) as f64;
            let moved = translate_points(props.points("points"), dx, 0.0);
            let _ = props.set("points", PropValue::Points(moved));
        });
        core.props.listen("y", |props, new, old| {
            let dy = (new.as_int() - old.as_int()) as f64;
            let moved = translate_points(props.points("points"), 0.0, dy);
            let _ = props.set("points", PropValue::Points(moved));
        });
    }

    fn draw(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let b = core.content_bounds();
        let points = core.props.points("points").to_vec();
        let line_width = core.props.int("line_width") as f64;
        let g = &mut *ctx.g;

        let alpha = if core.transparent() {
            0.0
        } else {
            core.props.int("alpha") as f64 / 255.0
        };
        g.set_global_alpha(alpha);

        g.set_line_width(line_width);
        g.set_stroke_style(core.background_color());
        trace(g, &points);
        g.stroke();

        let level = core.props.float("fill_level");
        if level > 0.0 {
            let fill = fill_fraction(b, level, core.props.bool("horizontal_fill"));

            g.save();
            g.begin_path();
            g.rect(Bounds::new(
                b.x - line_width / 2.0,
                fill.y - line_width / 2.0,
                fill.width + line_width,
                fill.height + line_width,
            ));
            g.clip();

            g.set_stroke_style(core.foreground_color());
            trace(g, &points);
            g.stroke();
            g.restore();
        }

        g.set_global_alpha(1.0);
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
