//! Polygon shape widget.

use crate::geometry::{translate_points, Point};
use crate::property::{Color, Property, PropValue};
use crate::render::surface::{FillStyle, Surface};
use crate::widget::{DrawContext, RenderError, WidgetCore, WidgetKind};

use super::rectangle::fill_fraction;

/// A closed polygon with absolute vertex coordinates.
///
/// The point list is stored in canvas coordinates, not relative to the
/// bounding box. Moving the widget through its `x`/`y` properties therefore
/// translates the whole list, keeping relative shape intact.
pub struct Polygon;

fn trace(g: &mut dyn Surface, points: &[Point]) {
    g.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            g.move_to(p.x, p.y);
        } else {
            g.line_to(p.x, p.y);
        }
    }
    g.close_path();
}

impl WidgetKind for Polygon {
    fn declare(&self, core: &mut WidgetCore) {
        core.props.add(Property::int("alpha", 255));
        core.props.add(Property::int("line_width", 0));
        core.props.add(Property::float("fill_level", 0.0));
        core.props.add(Property::bool("horizontal_fill", false));
        core.props.add(Property::color("line_color", Color::BLACK));
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
        let g = &mut *ctx.g;

        let alpha = if core.transparent() {
            0.0
        } else {
            core.props.int("alpha") as f64 / 255.0
        };
        g.set_global_alpha(alpha);

        trace(g, &points);
        g.set_fill_style(FillStyle::Solid(core.background_color()));
        g.fill();

        let line_width = core.props.int("line_width") as f64;
        if line_width > 0.0 {
            trace(g, &points);
            g.set_line_width(line_width);
            g.set_stroke_style(core.props.color("line_color"));
            g.stroke();
        }

        let level = core.props.float("fill_level");
        if level > 0.0 {
            let fill = fill_fraction(b, level, core.props.bool("horizontal_fill"));

            g.save();
            g.begin_path();
            g.rect(crate::geometry::Bounds::new(
                b.x - line_width / 2.0,
                fill.y - line_width / 2.0,
                fill.width + line_width,
                fill.height + line_width,
            ));
            g.clip();

            trace(g, &points);
            g.set_fill_style(FillStyle::Solid(core.foreground_color()));
            g.fill();
            g.restore();
        }

        g.set_global_alpha(1.0);
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocNode, DocValue};
    use crate::hit::HitCanvas;
    use crate::pv::PvEngine;
    use crate::render::RasterSurface;
    use crate::widget::Widget;
    use crate::widgets::{WidgetRegistry, TYPE_POLYGON};

    fn triangle_node() -> DocNode {
        DocNode::new(TYPE_POLYGON)
            .with_text("wuid", "p")
            .with_text("x", "10")
            .with_text("y", "10")
            .with_text("width", "40")
            .with_text("height", "40")
            .with_value(
                "points",
                DocValue::Points(vec![
                    Point::new(10.0, 50.0),
                    Point::new(30.0, 10.0),
                    Point::new(50.0, 50.0),
                ]),
            )
            .with_value("background_color", DocValue::Color(Color::new(0, 128, 0)))
    }

    #[test]
    fn polygon_fills_its_interior() {
        let registry = WidgetRegistry::default();
        let widget = Widget::from_node(&triangle_node(), &registry);

        let mut surface = RasterSurface::new(60, 60);
        let mut hit = HitCanvas::new(60, 60);
        let pvs = PvEngine::new();
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });

        assert_eq!(surface.read_pixel(30, 40), Color::new(0, 128, 0));
        assert_eq!(surface.read_pixel(12, 12), Color::TRANSPARENT);
    }

    #[test]
    fn moving_x_translates_the_point_list() {
        let registry = WidgetRegistry::default();
        let mut widget = Widget::from_node(&triangle_node(), &registry);

        widget.core.set("x", PropValue::Int(25)).unwrap();
        let moved = widget.core.props.points("points").to_vec();
        assert_eq!(
            moved,
            vec![
                Point::new(25.0, 50.0),
                Point::new(45.0, 10.0),
                Point::new(65.0, 50.0),
            ]
        );
        // Relative shape intact.
        assert_eq!(moved[1] - moved[0], Point::new(20.0, -40.0));
    }

    #[test]
    fn moving_y_translates_the_point_list() {
        let registry = WidgetRegistry::default();
        let mut widget = Widget::from_node(&triangle_node(), &registry);

        widget.core.set("y", PropValue::Int(0)).unwrap();
        let moved = widget.core.props.points("points").to_vec();
        assert_eq!(moved[0], Point::new(10.0, 40.0));
        assert_eq!(moved[2], Point::new(50.0, 40.0));
    }
}
