//! Rectangle shape widget.

use crate::geometry::Bounds;
use crate::property::{Color, Property};
use crate::render::surface::{FillStyle, Gradient};
use crate::widget::{DrawContext, RenderError, WidgetCore, WidgetKind};

/// A filled rectangle with optional outline, gradient, and fill level.
///
/// Draws in content coordinates. The fill level paints the foreground color
/// over the lower (or leading) fraction of the shape, driven by the
/// `fill_level` percentage.
pub struct Rectangle;

impl Rectangle {
    fn background_style(core: &WidgetCore, b: Bounds) -> FillStyle {
        gradient_or_solid(
            core,
            b,
            core.props.color("bg_gradient_color"),
            core.background_color(),
        )
    }

    fn fill_style(core: &WidgetCore, b: Bounds) -> FillStyle {
        gradient_or_solid(
            core,
            b,
            core.props.color("fg_gradient_color"),
            core.foreground_color(),
        )
    }
}

/// Gradient axis follows the fill direction: horizontal fills grade
/// top-to-bottom, vertical fills grade left-to-right.
fn gradient_or_solid(core: &WidgetCore, b: Bounds, start: Color, end: Color) -> FillStyle {
    if core.props.bool("gradient") {
        let (x2, y2) = if core.props.bool("horizontal_fill") {
            (b.x, b.bottom())
        } else {
            (b.right(), b.y)
        };
        FillStyle::Linear(
            Gradient::linear(b.x, b.y, x2, y2)
                .stop(0.0, start)
                .stop(1.0, end),
        )
    } else {
        FillStyle::Solid(end)
    }
}

/// The fill-level fraction of `b`: scaled width for horizontal fills,
/// scaled height (anchored low) for vertical ones.
pub(super) fn fill_fraction(b: Bounds, level: f64, horizontal: bool) -> Bounds {
    let mut fill = b;
    if horizontal {
        fill.width *= level / 100.0;
    } else {
        fill.height *= level / 100.0;
        fill.y += fill.height;
    }
    fill
}

impl WidgetKind for Rectangle {
    fn declare(&self, core: &mut WidgetCore) {
        // The shape draws its own outline.
        core.set_hide_rounded_holder_border(true);
        core.props.add(Property::int("alpha", 255));
        core.props.add(Property::color("bg_gradient_color", Color::WHITE));
        core.props.add(Property::color("fg_gradient_color", Color::WHITE));
        core.props.add(Property::bool("gradient", false));
        core.props.add(Property::int("line_width", 0));
        core.props.add(Property::float("fill_level", 0.0));
        core.props.add(Property::bool("horizontal_fill", false));
        core.props.add(Property::color("line_color", Color::BLACK));
    }

    fn draw(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let b = core.content_bounds();
        let g = &mut *ctx.g;

        let alpha = if core.transparent() {
            0.0
        } else {
            core.props.int("alpha") as f64 / 255.0
        };
        g.set_global_alpha(alpha);

        g.set_fill_style(Self::background_style(core, b));
        g.fill_rect(b);

        let line_width = core.props.int("line_width") as f64;
        if line_width > 0.0 {
            g.set_line_width(line_width);
            g.set_stroke_style(core.props.color("line_color"));
            g.stroke_rect(b.to_border_box(line_width));
        }

        let level = core.props.float("fill_level");
        if level > 0.0 {
            let fill = fill_fraction(b, level, core.props.bool("horizontal_fill"));

            g.save();
            g.begin_path();
            g.rect(Bounds::new(
                b.x + line_width / 2.0,
                fill.y - line_width / 2.0,
                fill.width - line_width,
                fill.height - line_width,
            ));
            g.clip();

            g.set_fill_style(Self::fill_style(core, b));
            g.fill_rect(b.shrink(
                line_width / 2.0,
                line_width / 2.0,
                line_width / 2.0,
                line_width / 2.0,
            ));
            g.restore();
        }

        g.set_global_alpha(1.0);
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
