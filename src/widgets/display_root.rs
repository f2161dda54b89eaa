//! The document root: a container holding every top-level widget.

use crate::document::DocNode;
use crate::widget::{DrawContext, RenderError, Widget, WidgetCore, WidgetKind};

use super::WidgetRegistry;

/// The root container of a parsed display document.
///
/// Carries the document-level background and preferred size through the
/// base schema; its children are the display's top-level widgets, drawn in
/// document order (later elements paint on top).
#[derive(Default)]
pub struct DisplayRoot {
    children: Vec<Widget>,
}

impl WidgetKind for DisplayRoot {
    fn parse_children(&mut self, node: &DocNode, registry: &WidgetRegistry) {
        self.children = node
            .children
            .iter()
            .map(|child| Widget::from_node(child, registry))
            .collect();
    }

    fn draw(&self, _core: &WidgetCore, ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        // Each child contains its own failures; one bad widget does not
        // stop the rest of the document from painting.
        for child in &self.children {
            child.draw(ctx);
        }
        Ok(())
    }

    fn children(&self) -> &[Widget] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Widget] {
        &mut self.children
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::HitCanvas;
    use crate::pv::PvEngine;
    use crate::render::RasterSurface;
    use crate::widgets::{TYPE_DISPLAY, TYPE_RECTANGLE};

    #[test]
    fn children_draw_in_document_order() {
        let node = DocNode::new(TYPE_DISPLAY)
            .with_text("wuid", "root")
            .with_text("width", "100")
            .with_text("height", "100")
            .with_child(
                DocNode::new(TYPE_RECTANGLE)
                    .with_text("wuid", "below")
                    .with_text("width", "50")
                    .with_text("height", "50"),
            )
            .with_child(
                DocNode::new(TYPE_RECTANGLE)
                    .with_text("wuid", "above")
                    .with_text("x", "10")
                    .with_text("y", "10")
                    .with_text("width", "20")
                    .with_text("height", "20"),
            );
        let registry = WidgetRegistry::default();
        let root = Widget::from_node(&node, &registry);

        let mut surface = RasterSurface::new(100, 100);
        let mut hit = HitCanvas::new(100, 100);
        let pvs = PvEngine::new();
        root.draw(&mut DrawContext { g: &mut surface, hit: &mut hit, pvs: &pvs });

        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[1].core.wuid(), "above");
    }
}
