//! Text monitor widget.

use crate::property::{Font, Property};
use crate::render::surface::{FillStyle, TextAlign, TextBaseline};
use crate::widget::{DrawContext, RenderError, WidgetCore, WidgetKind};

/// Displays the bound data point's value as text, falling back to the
/// static `text` property while no value is known.
pub struct TextUpdate;

impl WidgetKind for TextUpdate {
    fn declare(&self, core: &mut WidgetCore) {
        core.props.add(Property::font("font", Font::default()));
        core.props.add(Property::int("horizontal_alignment", 0));
        core.props.add(Property::int("vertical_alignment", 0));
    }

    fn draw(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        let b = core.content_bounds();
        let g = &mut *ctx.g;

        if !core.transparent() {
            g.set_fill_style(FillStyle::Solid(core.background_color()));
            g.fill_rect(b);
        }

        g.set_fill_style(FillStyle::Solid(core.foreground_color()));
        g.set_font(core.font("font"));

        let mut x = b.x;
        match core.props.int("horizontal_alignment") {
            1 => {
                x += b.width / 2.0;
                g.set_text_align(TextAlign::Center);
            }
            2 => {
                x += b.width;
                g.set_text_align(TextAlign::End);
            }
            _ => g.set_text_align(TextAlign::Start),
        }

        let mut y = b.y;
        match core.props.int("vertical_alignment") {
            1 => {
                y += b.height / 2.0;
                g.set_text_baseline(TextBaseline::Middle);
            }
            2 => {
                y += b.height;
                g.set_text_baseline(TextBaseline::Bottom);
            }
            _ => g.set_text_baseline(TextBaseline::Top),
        }

        let text = match core.pv_value(ctx.pvs) {
            Some(value) => value.to_display_string(),
            None => core.text(),
        };
        g.fill_text(&text, x, y);
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocNode;
    use crate::hit::HitCanvas;
    use crate::property::Color;
    use crate::pv::{PvEngine, PvUpdate, PvValue};
    use crate::render::surface::Surface;
    use crate::render::RasterSurface;
    use crate::testing::RecordingSurface;
    use crate::widget::Widget;
    use crate::widgets::{WidgetRegistry, TYPE_TEXT_UPDATE};
    use std::time::SystemTime;

    fn monitor_node() -> DocNode {
        DocNode::new(TYPE_TEXT_UPDATE)
            .with_text("wuid", "t")
            .with_text("x", "0")
            .with_text("y", "0")
            .with_text("width", "80")
            .with_text("height", "20")
            .with_text("text", "---")
            .with_text("pv_name", "temp")
            .with_text("transparent", "true")
    }

    #[test]
    fn falls_back_to_static_text_without_a_value() {
        let registry = WidgetRegistry::default();
        let widget = Widget::from_node(&monitor_node(), &registry);

        let mut surface = RecordingSurface::new(80, 20);
        let mut hit = HitCanvas::new(80, 20);
        let pvs = PvEngine::new();
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });
        assert_eq!(surface.texts(), vec!["---".to_owned()]);
    }

    #[test]
    fn renders_the_bound_value_once_known() {
        let registry = WidgetRegistry::default();
        let widget = Widget::from_node(&monitor_node(), &registry);

        let mut pvs = PvEngine::new();
        pvs.subscribe("temp");
        pvs.update_sender()
            .send(PvUpdate {
                name: "temp".into(),
                value: PvValue::Num(21.5),
                writable: false,
                timestamp: SystemTime::now(),
            })
            .unwrap();
        pvs.drain_updates();

        let mut surface = RecordingSurface::new(80, 20);
        let mut hit = HitCanvas::new(80, 20);
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });
        assert_eq!(surface.texts(), vec!["21.5".to_owned()]);
    }

    #[test]
    fn opaque_monitor_paints_its_background() {
        let registry = WidgetRegistry::default();
        let node = monitor_node().with_text("transparent", "false").with_value(
            "background_color",
            crate::document::DocValue::Color(Color::new(10, 20, 30)),
        );
        let widget = Widget::from_node(&node, &registry);

        let mut surface = RasterSurface::new(80, 20);
        let mut hit = HitCanvas::new(80, 20);
        let pvs = PvEngine::new();
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });
        assert_eq!(surface.read_pixel(40, 10), Color::new(10, 20, 30));
    }
}
