//! Built-in widget kinds and the kind registry.

pub mod boolean_switch;
pub mod display_root;
pub mod polygon;
pub mod polyline;
pub mod rectangle;
pub mod text_update;

pub use boolean_switch::BooleanSwitch;
pub use display_root::DisplayRoot;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rectangle::Rectangle;
pub use text_update::TextUpdate;

use tracing::warn;

use crate::widget::{DrawContext, RenderError, WidgetCore, WidgetKind};

// Widget-type identifiers as they appear in display documents.
pub const TYPE_DISPLAY: &str = "org.csstudio.opibuilder.Display";
pub const TYPE_BOOLEAN_SWITCH: &str = "org.csstudio.opibuilder.widgets.BoolSwitch";
pub const TYPE_POLYGON: &str = "org.csstudio.opibuilder.widgets.polygon";
pub const TYPE_POLYLINE: &str = "org.csstudio.opibuilder.widgets.polyline";
pub const TYPE_RECTANGLE: &str = "org.csstudio.opibuilder.widgets.Rectangle";
pub const TYPE_TEXT_UPDATE: &str = "org.csstudio.opibuilder.widgets.TextUpdate";

type Factory = fn() -> Box<dyn WidgetKind>;

// ---------------------------------------------------------------------------
// WidgetRegistry
// ---------------------------------------------------------------------------

/// Maps document widget-type identifiers to kind factories.
///
/// Unknown identifiers degrade to a placeholder kind that occupies its
/// declared bounds but paints nothing, so one exotic widget never takes
/// down a whole display.
pub struct WidgetRegistry {
    factories: Vec<(String, Factory)>,
}

impl Default for WidgetRegistry {
    /// A registry with every built-in kind.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(TYPE_DISPLAY, || Box::<DisplayRoot>::default());
        registry.register(TYPE_BOOLEAN_SWITCH, || Box::<BooleanSwitch>::default());
        registry.register(TYPE_POLYGON, || Box::new(Polygon));
        registry.register(TYPE_POLYLINE, || Box::new(Polyline));
        registry.register(TYPE_RECTANGLE, || Box::new(Rectangle));
        registry.register(TYPE_TEXT_UPDATE, || Box::new(TextUpdate));
        registry
    }
}

impl WidgetRegistry {
    /// A registry with no kinds at all.
    pub fn empty() -> Self {
        Self { factories: Vec::new() }
    }

    /// Register (or replace) a kind factory.
    pub fn register(&mut self, kind_id: &str, factory: Factory) {
        if let Some(slot) = self.factories.iter_mut().find(|(id, _)| id == kind_id) {
            slot.1 = factory;
        } else {
            self.factories.push((kind_id.to_owned(), factory));
        }
    }

    /// Whether a kind identifier has a real factory.
    pub fn supports(&self, kind_id: &str) -> bool {
        self.factories.iter().any(|(id, _)| id == kind_id)
    }

    /// Instantiate a kind; unknown identifiers get the placeholder.
    pub fn create(&self, kind_id: &str) -> Box<dyn WidgetKind> {
        match self.factories.iter().find(|(id, _)| id == kind_id) {
            Some((_, factory)) => factory(),
            None => {
                warn!(kind = kind_id, "unsupported widget type");
                Box::new(Unsupported)
            }
        }
    }
}

/// Placeholder for unknown widget kinds.
struct Unsupported;

impl WidgetKind for Unsupported {
    fn draw(&self, _core: &WidgetCore, _ctx: &mut DrawContext<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
