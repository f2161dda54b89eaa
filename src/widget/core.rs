//! Shared per-widget state: base schema, layout, holder drawing.

use crate::action::ActionSet;
use crate::border::{self, Insets};
use crate::document::DocNode;
use crate::geometry::Bounds;
use crate::hit::HitRegion;
use crate::property::{Color, Font, Property, PropertySet, PropValue, SchemaError};
use crate::pv::{PvEngine, PvValue};
use crate::render::surface::{FillStyle, Surface};

use super::dispatch::Dispatch;
use super::DrawContext;

/// The role string of the whole-widget click area.
pub const HOLDER_ROLE: &str = "holder";

/// Property names whose value feeds the layout pass.
const LAYOUT_PROPS: [&str; 7] = [
    "x",
    "y",
    "width",
    "height",
    "border_style",
    "border_width",
    "border_alarm_sensitive",
];

/// The state every widget node carries regardless of kind: the property set
/// (base schema plus kind extensions), the computed border insets, and the
/// holder/content rectangles derived from them.
///
/// Geometry convention: the *holder* rectangle is the declared bounding box;
/// the *content* rectangle is the holder shrunk by the border insets. Kind
/// drawing code works in content coordinates.
pub struct WidgetCore {
    pub props: PropertySet,
    insets: Insets,
    hide_rounded_holder_border: bool,
}

impl WidgetCore {
    /// Create a core with the base schema, in canonical declaration order.
    pub fn new(widget_type: &str) -> Self {
        let props = PropertySet::new(vec![
            Property::actions("actions", ActionSet::new()),
            Property::color("background_color", Color::TRANSPARENT),
            Property::bool("border_alarm_sensitive", false),
            Property::color("border_color", Color::BLACK),
            Property::int("border_style", 0),
            Property::int("border_width", 0),
            Property::color("foreground_color", Color::BLACK),
            Property::int("height", 0),
            Property::string("name", ""),
            Property::string("pv_name", ""),
            Property::string("text", ""),
            Property::bool("transparent", false),
            Property::bool("visible", true),
            Property::string("widget_type", widget_type),
            Property::int("width", 0),
            Property::string("wuid", ""),
            Property::int("x", 0),
            Property::int("y", 0),
        ]);
        Self { props, insets: Insets::ZERO, hide_rounded_holder_border: false }
    }

    /// Load document values and recompute layout.
    pub fn load(&mut self, node: &DocNode) {
        self.props.load(node);
        self.relayout();
    }

    /// Recompute border insets from the current border properties.
    pub fn relayout(&mut self) {
        self.insets = border::insets(
            self.props.int("border_style"),
            self.props.int("border_width"),
            self.props.bool("border_alarm_sensitive"),
        );
    }

    /// Write a property; layout-feeding properties trigger a relayout.
    pub fn set(&mut self, name: &str, value: PropValue) -> Result<bool, SchemaError> {
        let changed = self.props.set(name, value)?;
        if changed && LAYOUT_PROPS.contains(&name) {
            self.relayout();
        }
        Ok(changed)
    }

    // -- geometry

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// The declared bounding box.
    pub fn holder_bounds(&self) -> Bounds {
        Bounds::new(
            self.props.int("x") as f64,
            self.props.int("y") as f64,
            self.props.int("width") as f64,
            self.props.int("height") as f64,
        )
    }

    /// The holder shrunk by the border insets.
    pub fn content_bounds(&self) -> Bounds {
        self.insets.apply(self.holder_bounds())
    }

    // -- base property accessors

    pub fn wuid(&self) -> &str {
        self.props.str("wuid")
    }

    pub fn name(&self) -> &str {
        self.props.str("name")
    }

    /// The bound data point, or `None` when the widget is unbound.
    pub fn pv_name(&self) -> Option<&str> {
        match self.props.str("pv_name") {
            "" => None,
            name => Some(name),
        }
    }

    /// The widget text, with spaces hardened to no-break spaces so that
    /// runs of whitespace survive text layout.
    pub fn text(&self) -> String {
        self.props.str("text").replace(' ', "\u{a0}")
    }

    pub fn visible(&self) -> bool {
        self.props.bool("visible")
    }

    pub fn transparent(&self) -> bool {
        self.props.bool("transparent")
    }

    pub fn background_color(&self) -> Color {
        self.props.color("background_color")
    }

    pub fn foreground_color(&self) -> Color {
        self.props.color("foreground_color")
    }

    pub fn font(&self, name: &str) -> &Font {
        self.props.font(name)
    }

    pub fn actions(&self) -> &ActionSet {
        self.props.actions("actions")
    }

    /// Last known value of the bound data point.
    pub fn pv_value<'a>(&self, pvs: &'a PvEngine) -> Option<&'a PvValue> {
        self.pv_name().and_then(|name| pvs.value(name))
    }

    /// Disable the rounded-background holder border (shape widgets that
    /// paint their own outline).
    pub fn set_hide_rounded_holder_border(&mut self, hide: bool) {
        self.hide_rounded_holder_border = hide;
    }

    // -- holder drawing

    /// Paint the holder border and, when the widget has click actions,
    /// register the whole holder rectangle as its click region.
    pub fn draw_holder(&self, ctx: &mut DrawContext<'_>) {
        border::draw(
            ctx.g,
            self.holder_bounds(),
            self.props.int("border_style"),
            self.props.int("border_width"),
            self.props.color("border_color"),
            self.background_color(),
            self.hide_rounded_holder_border,
        );

        if self.actions().is_clickable() {
            ctx.hit
                .begin_region(HitRegion::new(self.wuid(), HOLDER_ROLE).clickable());
            ctx.hit.ctx().fill_rect(self.holder_bounds());
        }
    }

    /// Paint the edit-mode selection decoration: an outline around the
    /// holder plus eight drag handles (corners and edge midpoints).
    pub fn draw_selection(&self, g: &mut dyn Surface) {
        let b = self.holder_bounds();

        g.set_line_width(1.0);
        g.set_stroke_style(Color::BLACK);
        g.stroke_rect(Bounds::new(b.x - 0.5, b.y - 0.5, b.width + 1.0, b.height + 1.0));

        let anchors = [
            (b.x, b.y),
            (b.x + b.width / 2.0, b.y),
            (b.right(), b.y),
            (b.x, b.y + b.height / 2.0),
            (b.right(), b.y + b.height / 2.0),
            (b.x, b.bottom()),
            (b.x + b.width / 2.0, b.bottom()),
            (b.right(), b.bottom()),
        ];
        g.set_fill_style(FillStyle::Solid(Color::BLACK));
        for (x, y) in anchors {
            g.fill_rect(Bounds::new(x - 2.0, y - 2.0, 4.0, 4.0));
        }
        g.set_stroke_style(Color::WHITE);
        for (x, y) in anchors {
            g.stroke_rect(Bounds::new(x - 2.5, y - 2.5, 5.0, 5.0));
        }
    }

    // -- actions

    /// Run the click-hooked actions, in declared order.
    pub fn click_holder(&self, dispatch: &mut Dispatch<'_>) {
        for idx in self.actions().click_actions() {
            self.execute_action(idx, dispatch);
        }
    }

    /// Run one action by index. Out-of-range and negative indices are a
    /// silent no-op.
    pub fn execute_action(&self, index: i64, dispatch: &mut Dispatch<'_>) {
        if let Some(action) = self.actions().action(index) {
            dispatch.execute(action);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, OpenMode};
    use crate::pv::PvEngine;
    use crate::scripting::NoopRunner;
    use crate::widget::dispatch::DisplayRequest;

    fn loaded_core() -> WidgetCore {
        let node = DocNode::new("org.csstudio.opibuilder.widgets.Rectangle")
            .with_text("wuid", "w1")
            .with_text("x", "10")
            .with_text("y", "10")
            .with_text("width", "100")
            .with_text("height", "50")
            .with_text("border_style", "1")
            .with_text("border_width", "2");
        let mut core = WidgetCore::new(&node.kind);
        core.load(&node);
        core
    }

    #[test]
    fn base_schema_has_all_names() {
        let core = WidgetCore::new("k");
        for name in [
            "actions",
            "background_color",
            "border_alarm_sensitive",
            "border_color",
            "border_style",
            "border_width",
            "foreground_color",
            "height",
            "name",
            "pv_name",
            "text",
            "transparent",
            "visible",
            "widget_type",
            "width",
            "wuid",
            "x",
            "y",
        ] {
            assert!(core.props.has(name), "missing base property {name}");
        }
        assert_eq!(core.props.str("widget_type"), "k");
    }

    #[test]
    fn content_bounds_follow_border_insets() {
        let core = loaded_core();
        assert_eq!(core.holder_bounds(), Bounds::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(core.content_bounds(), Bounds::new(12.0, 12.0, 96.0, 46.0));
    }

    #[test]
    fn layout_writes_trigger_relayout() {
        let mut core = loaded_core();
        core.set("border_width", PropValue::Int(5)).unwrap();
        assert_eq!(core.content_bounds(), Bounds::new(15.0, 15.0, 90.0, 40.0));
        core.set("border_style", PropValue::Int(0)).unwrap();
        assert_eq!(core.content_bounds(), core.holder_bounds());
    }

    #[test]
    fn empty_pv_name_is_unbound() {
        let mut core = loaded_core();
        assert!(core.pv_name().is_none());
        core.set("pv_name", PropValue::Str("temp".into())).unwrap();
        assert_eq!(core.pv_name(), Some("temp"));
    }

    #[test]
    fn text_preserves_whitespace_runs() {
        let mut core = loaded_core();
        core.set("text", PropValue::Str("a  b".into())).unwrap();
        assert_eq!(core.text(), "a\u{a0}\u{a0}b");
    }

    #[test]
    fn click_runs_hooked_actions_in_order() {
        let mut core = loaded_core();
        let actions = ActionSet::new()
            .with_action(Action::OpenDisplay {
                path: "one.opi".into(),
                mode: OpenMode::NewWindow,
            })
            .with_action(Action::OpenDisplay {
                path: "two.opi".into(),
                mode: OpenMode::NewWindow,
            })
            .hooked_all();
        core.set("actions", PropValue::Actions(actions)).unwrap();

        let mut pvs = PvEngine::new();
        let mut runner = NoopRunner;
        let mut dispatch = Dispatch::new(&mut pvs, &mut runner);
        core.click_holder(&mut dispatch);

        let paths: Vec<_> = dispatch
            .take_requests()
            .into_iter()
            .map(|r| match r {
                DisplayRequest::OpenWindow { path } => path,
                other => panic!("unexpected request {other:?}"),
            })
            .collect();
        assert_eq!(paths, vec!["one.opi", "two.opi"]);
    }

    #[test]
    fn out_of_range_action_is_a_noop() {
        let core = loaded_core();
        let mut pvs = PvEngine::new();
        let mut runner = NoopRunner;
        let mut dispatch = Dispatch::new(&mut pvs, &mut runner);
        core.execute_action(5, &mut dispatch);
        core.execute_action(-1, &mut dispatch);
        assert!(dispatch.take_requests().is_empty());
        assert!(!dispatch.repaint_requested());
    }
}
