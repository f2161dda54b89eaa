//! Widget nodes: kind-polymorphic display tree elements.
//!
//! A [`Widget`] pairs the kind-independent [`WidgetCore`] (schema, layout,
//! holder) with a [`WidgetKind`] implementation supplying kind-specific
//! properties, drawing, and interaction. The tree is built once per
//! document; containers own their children through their kind.
//!
//! Lifecycle: declare kind properties, load document values, initialize
//! listeners, parse children. Drawing and interaction then run against the
//! fully constructed node.

pub mod core;
pub mod dispatch;

pub use self::core::{WidgetCore, HOLDER_ROLE};
pub use self::dispatch::{Dispatch, DisplayRequest};

use tracing::warn;

use crate::document::DocNode;
use crate::event::RegionEvent;
use crate::hit::HitCanvas;
use crate::pv::PvEngine;
use crate::render::surface::Surface;
use crate::widgets::WidgetRegistry;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A drawing failure scoped to one widget.
///
/// Containers isolate these: a failing child is logged and skipped, the
/// rest of the frame still paints.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to load resource {path}: {reason}")]
    ResourceLoad { path: String, reason: String },
}

// ---------------------------------------------------------------------------
// DrawContext
// ---------------------------------------------------------------------------

/// Everything a widget needs during one draw pass: the visible surface, the
/// hit canvas to mirror interactive geometry into, and read access to the
/// data bindings.
pub struct DrawContext<'a> {
    pub g: &'a mut dyn Surface,
    pub hit: &'a mut HitCanvas,
    pub pvs: &'a PvEngine,
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Kind-specific behavior plugged into a [`Widget`].
///
/// The default implementations describe a leaf widget with no extra
/// properties and no interaction.
pub trait WidgetKind {
    /// Declare kind-specific properties on top of the base schema. Runs
    /// before document values are loaded.
    fn declare(&self, _core: &mut WidgetCore) {}

    /// Attach listeners and derive initial state. Runs after document
    /// values are loaded.
    fn init(&mut self, _core: &mut WidgetCore) {}

    /// Build child nodes from nested document elements (containers only).
    fn parse_children(&mut self, _node: &DocNode, _registry: &WidgetRegistry) {}

    /// Paint the widget content and mirror interactive geometry onto the
    /// hit canvas.
    fn draw(&self, core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError>;

    /// Handle an interaction on one of this widget's registered regions.
    fn interact(
        &mut self,
        _core: &mut WidgetCore,
        _role: &str,
        _event: RegionEvent,
        _dispatch: &mut Dispatch<'_>,
    ) {
    }

    fn children(&self) -> &[Widget] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Widget] {
        &mut []
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// One node of the display tree.
pub struct Widget {
    pub core: WidgetCore,
    kind: Box<dyn WidgetKind>,
}

impl Widget {
    /// Build a widget (and its subtree) from a document element.
    pub fn from_node(node: &DocNode, registry: &WidgetRegistry) -> Widget {
        let mut kind = registry.create(&node.kind);
        let mut core = WidgetCore::new(&node.kind);
        kind.declare(&mut core);
        core.load(node);
        kind.init(&mut core);
        kind.parse_children(node, registry);
        Widget { core, kind }
    }

    /// Assemble a widget from parts (tests, programmatic trees).
    pub fn from_parts(core: WidgetCore, kind: Box<dyn WidgetKind>) -> Widget {
        Widget { core, kind }
    }

    /// Paint this node: holder first, then kind content. Invisible widgets
    /// paint nothing and register no regions. A kind failure is contained
    /// here.
    pub fn draw(&self, ctx: &mut DrawContext<'_>) {
        if !self.core.visible() {
            return;
        }
        self.core.draw_holder(ctx);
        if let Err(e) = self.kind.draw(&self.core, ctx) {
            warn!(wuid = self.core.wuid(), name = self.core.name(), %e, "widget failed to draw");
        }
    }

    /// Route a region interaction to the widget owning `wuid`.
    ///
    /// Holder clicks are handled uniformly here; every other role belongs
    /// to the kind. Returns whether a widget was found.
    pub fn interact(
        &mut self,
        wuid: &str,
        role: &str,
        event: RegionEvent,
        dispatch: &mut Dispatch<'_>,
    ) -> bool {
        if self.core.wuid() == wuid {
            if role == HOLDER_ROLE {
                if event == RegionEvent::Click {
                    self.core.click_holder(dispatch);
                }
            } else {
                self.kind.interact(&mut self.core, role, event, dispatch);
            }
            return true;
        }
        for child in self.kind.children_mut() {
            if child.interact(wuid, role, event, dispatch) {
                return true;
            }
        }
        false
    }

    /// Find a node by wuid, depth first.
    pub fn find(&self, wuid: &str) -> Option<&Widget> {
        if self.core.wuid() == wuid {
            return Some(self);
        }
        self.kind.children().iter().find_map(|c| c.find(wuid))
    }

    pub fn find_mut(&mut self, wuid: &str) -> Option<&mut Widget> {
        if self.core.wuid() == wuid {
            return Some(self);
        }
        self.kind
            .children_mut()
            .iter_mut()
            .find_map(|c| c.find_mut(wuid))
    }

    /// Visit this node and every descendant, depth first.
    pub fn visit(&self, f: &mut dyn FnMut(&Widget)) {
        f(self);
        for child in self.kind.children() {
            child.visit(f);
        }
    }

    pub fn children(&self) -> &[Widget] {
        self.kind.children()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionSet, OpenMode};
    use crate::document::DocValue;
    use crate::property::PropValue;
    use crate::scripting::NoopRunner;
    use crate::widgets::{self, WidgetRegistry};

    fn rect_node(wuid: &str) -> DocNode {
        DocNode::new(widgets::TYPE_RECTANGLE)
            .with_text("wuid", wuid)
            .with_text("x", "0")
            .with_text("y", "0")
            .with_text("width", "20")
            .with_text("height", "20")
    }

    fn display_node() -> DocNode {
        DocNode::new(widgets::TYPE_DISPLAY)
            .with_text("wuid", "root")
            .with_text("width", "200")
            .with_text("height", "100")
            .with_child(rect_node("r1"))
            .with_child(rect_node("r2"))
    }

    #[test]
    fn tree_construction_parses_children() {
        let registry = WidgetRegistry::default();
        let root = Widget::from_node(&display_node(), &registry);
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].core.wuid(), "r1");
    }

    #[test]
    fn find_descends_into_children() {
        let registry = WidgetRegistry::default();
        let root = Widget::from_node(&display_node(), &registry);
        assert!(root.find("r2").is_some());
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn visit_covers_every_node() {
        let registry = WidgetRegistry::default();
        let root = Widget::from_node(&display_node(), &registry);
        let mut wuids = Vec::new();
        root.visit(&mut |w| wuids.push(w.core.wuid().to_owned()));
        assert_eq!(wuids, vec!["root", "r1", "r2"]);
    }

    #[test]
    fn invisible_widget_registers_no_regions() {
        let registry = WidgetRegistry::default();
        let node = rect_node("r1")
            .with_text("visible", "false")
            .with_value(
                "actions",
                DocValue::Actions(
                    ActionSet::new()
                        .with_action(Action::OpenDisplay {
                            path: "x.opi".into(),
                            mode: OpenMode::Replace,
                        })
                        .hooked_first(),
                ),
            );
        let widget = Widget::from_node(&node, &registry);

        let mut surface = crate::render::RasterSurface::new(50, 50);
        let mut hit = crate::hit::HitCanvas::new(50, 50);
        let pvs = PvEngine::new();
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });
        assert_eq!(hit.region_count(), 0);
    }

    #[test]
    fn holder_click_routes_to_actions() {
        let registry = WidgetRegistry::default();
        let node = rect_node("r1").with_value(
            "actions",
            DocValue::Actions(
                ActionSet::new()
                    .with_action(Action::OpenDisplay {
                        path: "next.opi".into(),
                        mode: OpenMode::Replace,
                    })
                    .hooked_first(),
            ),
        );
        let mut widget = Widget::from_node(&node, &registry);

        let mut pvs = PvEngine::new();
        let mut runner = NoopRunner;
        let mut dispatch = Dispatch::new(&mut pvs, &mut runner);
        assert!(widget.interact("r1", HOLDER_ROLE, RegionEvent::Click, &mut dispatch));
        assert_eq!(
            dispatch.take_requests(),
            vec![DisplayRequest::OpenDisplay { path: "next.opi".into() }]
        );
    }

    #[test]
    fn interact_misses_unknown_wuid() {
        let registry = WidgetRegistry::default();
        let mut root = Widget::from_node(&display_node(), &registry);
        let mut pvs = PvEngine::new();
        let mut runner = NoopRunner;
        let mut dispatch = Dispatch::new(&mut pvs, &mut runner);
        assert!(!root.interact("ghost", HOLDER_ROLE, RegionEvent::Click, &mut dispatch));
    }

    #[test]
    fn failing_kind_is_contained() {
        struct Failing;
        impl WidgetKind for Failing {
            fn draw(
                &self,
                _core: &WidgetCore,
                _ctx: &mut DrawContext<'_>,
            ) -> Result<(), RenderError> {
                Err(RenderError::ResourceLoad {
                    path: "missing.png".into(),
                    reason: "not found".into(),
                })
            }
        }

        let mut core = WidgetCore::new("test.Failing");
        core.set("width", PropValue::Int(10)).unwrap();
        core.set("height", PropValue::Int(10)).unwrap();
        let widget = Widget::from_parts(core, Box::new(Failing));

        let mut surface = crate::render::RasterSurface::new(50, 50);
        let mut hit = crate::hit::HitCanvas::new(50, 50);
        let pvs = PvEngine::new();
        // Must not panic or poison the pass.
        widget.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });
    }
}
