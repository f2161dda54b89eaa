//! Two-state switch control.

use crate::event::RegionEvent;
use crate::geometry::Bounds;
use crate::hit::HitRegion;
use crate::property::{Color, Property};
use crate::pv::PvValue;
use crate::render::surface::{FillStyle, Gradient, Surface};
use crate::widget::{Dispatch, DrawContext, RenderError, WidgetCore, WidgetKind};

/// The role string of the interactive shaft area.
pub const SHAFT_ROLE: &str = "shaft";

/// A lever-style on/off switch.
///
/// The interactive area is the shaft (pedestal knob plus bar), mirrored
/// shape-exact onto the hit canvas; presses outside the lever do nothing.
/// Toggling writes 1/0 to the bound data point when it is writable and runs
/// the configured push/release actions.
#[derive(Default)]
pub struct BooleanSwitch {
    enabled: bool,
}

impl BooleanSwitch {
    /// Current switch position.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn toggle(&mut self, core: &WidgetCore, dispatch: &mut Dispatch<'_>) {
        self.enabled = !self.enabled;
        if self.enabled {
            self.write_bound(core, dispatch, 1.0);
            core.execute_action(core.props.int("push_action_index"), dispatch);
        } else {
            self.write_bound(core, dispatch, 0.0);
            core.execute_action(core.props.int("released_action_index"), dispatch);
        }
        dispatch.request_repaint();
    }

    fn write_bound(&self, core: &WidgetCore, dispatch: &mut Dispatch<'_>, value: f64) {
        if let Some(name) = core.pv_name() {
            if dispatch.pvs().is_writable(name) {
                dispatch.write_pv(name, PvValue::Num(value));
            }
        }
    }

    fn on_off_color(&self, core: &WidgetCore) -> Color {
        if self.enabled {
            core.props.color("on_color")
        } else {
            core.props.color("off_color")
        }
    }

    fn draw_pedestal(&self, core: &WidgetCore, g: &mut dyn Surface, b: Bounds, ped: Bounds) {
        let effect_3d = core.props.bool("effect_3d");
        let cx = b.x + ped.x + ped.width / 2.0;
        let cy = b.y + ped.y + ped.height / 2.0;

        let base = if effect_3d { Color::WHITE } else { Color::GRAY };
        g.set_fill_style(FillStyle::Solid(base));
        g.begin_path();
        g.ellipse(cx, cy, ped.width / 2.0, ped.height / 2.0);
        g.fill();

        if effect_3d {
            let (start, end) = if self.enabled {
                (
                    Color::with_alpha(255, 255, 255, 10),
                    Color::with_alpha(0, 0, 0, 100),
                )
            } else {
                (Color::with_alpha(0, 0, 0, 0), Color::with_alpha(0, 0, 0, 150))
            };
            g.set_fill_style(FillStyle::Linear(
                Gradient::linear(
                    b.x + ped.x,
                    b.y + ped.y,
                    b.x + ped.x + ped.width,
                    b.y + ped.y + ped.height,
                )
                .stop(0.0, start)
                .stop(1.0, end),
            ));
            g.begin_path();
            g.ellipse(cx, cy, ped.width / 2.0, ped.height / 2.0);
            g.fill();
        }
    }

    /// Paint the lever (small end, bar, large end) and mirror the same
    /// geometry onto the hit canvas as the shaft region.
    #[allow(clippy::too_many_arguments)]
    fn draw_lever(
        &self,
        core: &WidgetCore,
        ctx: &mut DrawContext<'_>,
        b: Bounds,
        sm: Bounds,
        lg: Bounds,
        horizontal: bool,
    ) {
        let effect_3d = core.props.bool("effect_3d");
        let color = self.on_off_color(core);

        let shading = if horizontal {
            let (a0, a1) = if self.enabled { (0, 150) } else { (10, 220) };
            Gradient::linear(b.x + lg.x, b.y + lg.y, b.x + lg.x, b.y + lg.y + lg.height)
                .stop(0.0, Color::with_alpha(0, 0, 0, a0))
                .stop(1.0, Color::with_alpha(0, 0, 0, a1))
        } else {
            let a1 = if self.enabled { 210 } else { 160 };
            Gradient::linear(b.x + lg.x, b.y + lg.y, b.x + lg.x + lg.width, b.y + lg.y)
                .stop(0.0, Color::with_alpha(0, 0, 0, 10))
                .stop(1.0, Color::with_alpha(0, 0, 0, a1))
        };

        ctx.hit
            .begin_region(HitRegion::new(core.wuid(), SHAFT_ROLE).pressable());

        // Bar quad endpoints sit on the midlines of the two ends.
        let quad = if horizontal {
            [
                ((b.x + lg.x + lg.width / 2.0).round(), (b.y + lg.y).round()),
                ((b.x + lg.x + lg.width / 2.0).round(), (b.y + lg.y + lg.height).round()),
                ((b.x + sm.x + sm.width / 2.0).round(), (b.y + sm.y + sm.height).round()),
                ((b.x + sm.x + sm.width / 2.0).round(), (b.y + sm.y).round()),
            ]
        } else {
            [
                ((b.x + lg.x).round(), (b.y + lg.y + lg.height / 2.0).round()),
                ((b.x + lg.x + lg.width).round(), (b.y + lg.y + lg.height / 2.0).round()),
                ((b.x + sm.x + sm.width).round(), (b.y + sm.y + sm.height / 2.0).round()),
                ((b.x + sm.x).round(), (b.y + sm.y + sm.height / 2.0).round()),
            ]
        };

        for shape in [Shape::End(sm), Shape::Bar(quad), Shape::End(lg)] {
            shape.trace(ctx.g, b);
            shape.trace(ctx.hit.ctx(), b);
            ctx.hit.ctx().fill();

            ctx.g.set_fill_style(FillStyle::Solid(color));
            ctx.g.fill();
            if effect_3d {
                shape.trace(ctx.g, b);
                ctx.g.set_fill_style(FillStyle::Linear(shading.clone()));
                ctx.g.fill();
            }
        }
    }

    fn draw_horizontal(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>, b: Bounds) {
        let mut area_w = b.width;
        let mut area_h = b.height;
        if area_h > area_w / 2.0 {
            area_h = (area_w / 2.0).floor();
        } else {
            area_w = (2.0 * area_h).floor();
        }

        let ped = Bounds::new(
            (63.0 / 218.0 * area_w).floor(),
            0.0,
            area_h / 2.0,
            area_h / 2.0,
        );
        self.draw_pedestal(core, ctx.g, b, ped);

        let large_w = (35.0 / 218.0 * area_w).floor();
        let large_h = (45.0 / 105.0 * area_h).floor();
        let small_w = (43.0 / 218.0 * area_w).floor();
        let small_h = (35.0 / 105.0 * area_h).floor();
        let small_move = (ped.width / 7.0).floor();

        let (sm, lg) = if self.enabled {
            (
                Bounds::new(
                    ped.x + ped.width / 2.0 - small_w / 2.0 + small_move,
                    ped.y + ped.height / 2.0 - small_h / 2.0,
                    small_w,
                    small_h,
                ),
                Bounds::new(
                    2.0 * ped.x + ped.width - large_w,
                    ped.height / 2.0 - large_h / 2.0,
                    large_w,
                    large_h,
                ),
            )
        } else {
            (
                Bounds::new(
                    ped.x + ped.width / 2.0 - small_w / 2.0 - small_move,
                    ped.y + ped.height / 2.0 - small_h / 2.0,
                    small_w,
                    small_h,
                ),
                Bounds::new(0.0, ped.height / 2.0 - large_h / 2.0, large_w, large_h),
            )
        };
        self.draw_lever(core, ctx, b, sm, lg, true);
    }

    fn draw_vertical(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>, b: Bounds) {
        let mut area_w = b.width;
        let mut area_h = b.height;
        if area_w > area_h / 2.0 {
            area_w = (area_h / 2.0).floor();
        } else {
            area_h = (2.0 * area_w).floor();
        }

        let ped = Bounds::new(
            0.0,
            (63.0 / 218.0 * area_h).floor(),
            area_w / 2.0,
            area_w / 2.0,
        );
        self.draw_pedestal(core, ctx.g, b, ped);

        let large_w = (45.0 / 105.0 * area_w).floor();
        let large_h = (35.0 / 218.0 * area_h).floor();
        let small_w = (35.0 / 105.0 * area_w).floor();
        let small_h = (43.0 / 218.0 * area_h).floor();
        let small_move = (ped.height / 7.0).floor();

        let (sm, lg) = if self.enabled {
            (
                Bounds::new(
                    ped.x + ped.width / 2.0 - small_w / 2.0,
                    ped.y + ped.height / 2.0 - small_h / 2.0 - small_move,
                    small_w,
                    small_h,
                ),
                Bounds::new(ped.width / 2.0 - large_w / 2.0, 0.0, large_w, large_h),
            )
        } else {
            let sm_y = ped.y + ped.height / 2.0 - small_h / 2.0;
            let bar_bottom = ped.y + ped.height / 2.0 + small_h / 2.0 + 2.0;
            (
                Bounds::new(
                    ped.x + ped.width / 2.0 - small_w / 2.0,
                    sm_y + small_move,
                    small_w,
                    small_h,
                ),
                Bounds::new(
                    ped.width / 2.0 - large_w / 2.0,
                    sm_y + bar_bottom - large_h,
                    large_w,
                    large_h,
                ),
            )
        };
        self.draw_lever(core, ctx, b, sm, lg, false);
    }
}

/// One piece of the lever.
#[derive(Copy, Clone)]
enum Shape {
    /// An elliptical end cap.
    End(Bounds),
    /// The connecting quad, pre-rounded.
    Bar([(f64, f64); 4]),
}

impl Shape {
    fn trace(self, g: &mut dyn Surface, b: Bounds) {
        match self {
            Shape::End(e) => {
                g.begin_path();
                g.ellipse(
                    b.x + e.x + e.width / 2.0,
                    b.y + e.y + e.height / 2.0,
                    e.width / 2.0,
                    e.height / 2.0,
                );
            }
            Shape::Bar(points) => {
                g.begin_path();
                g.move_to(points[0].0, points[0].1);
                for (x, y) in &points[1..] {
                    g.line_to(*x, *y);
                }
                g.close_path();
            }
        }
    }
}

impl WidgetKind for BooleanSwitch {
    fn declare(&self, core: &mut WidgetCore) {
        core.props.add(Property::bool("effect_3d", false));
        core.props.add(Property::color("on_color", Color::new(0, 255, 0)));
        core.props.add(Property::string("on_label", ""));
        core.props.add(Property::color("off_color", Color::GRAY));
        core.props.add(Property::string("off_label", ""));
        // Negative index means no configured action.
        core.props.add(Property::int("push_action_index", -1));
        core.props.add(Property::int("released_action_index", -1));
        core.props.add(Property::bool("toggle_button", false));
    }

    fn draw(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let b = core.content_bounds();
        if b.width > b.height {
            self.draw_horizontal(core, ctx, b);
        } else {
            self.draw_vertical(core, ctx, b);
        }
        Ok(())
    }

    fn interact(
        &mut self,
        core: &mut WidgetCore,
        role: &str,
        event: RegionEvent,
        dispatch: &mut Dispatch<'_>,
    ) {
        if role == SHAFT_ROLE && event == RegionEvent::Press {
            self.toggle(core, dispatch);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
