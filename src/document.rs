//! Parsed-document model consumed by the property loader.
//!
//! The document parser itself is an external collaborator; this crate only
//! sees its output: a tree of named elements, each carrying a widget-kind
//! identifier and a flat list of named property values. Primitive values
//! arrive as raw text and are parsed against the declared property type;
//! colors, fonts, point lists, and action lists arrive already structured.

use crate::action::ActionSet;
use crate::geometry::Point;
use crate::property::{Color, Font};

// ---------------------------------------------------------------------------
// DocValue
// ---------------------------------------------------------------------------

/// A single named value inside a document element.
#[derive(Clone, Debug, PartialEq)]
pub enum DocValue {
    /// Raw text; interpreted against the declared property type.
    Text(String),
    Color(Color),
    Font(Font),
    Points(Vec<Point>),
    Actions(ActionSet),
}

// ---------------------------------------------------------------------------
// DocNode
// ---------------------------------------------------------------------------

/// One element of a parsed display document.
///
/// `kind` is the widget-type identifier (e.g.
/// `org.csstudio.opibuilder.widgets.Rectangle`); `children` carry nested
/// widget elements for container kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocNode {
    pub kind: String,
    values: Vec<(String, DocValue)>,
    pub children: Vec<DocNode>,
}

impl DocNode {
    /// Create an element of the given widget kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), values: Vec::new(), children: Vec::new() }
    }

    /// Look up a named value.
    pub fn value(&self, name: &str) -> Option<&DocValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Set a named value, replacing any previous value of the same name.
    pub fn set_value(&mut self, name: impl Into<String>, value: DocValue) {
        let name = name.into();
        if let Some(slot) = self.values.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    /// Set a raw-text value (builder).
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_value(name, DocValue::Text(text.into()));
        self
    }

    /// Set a structured value (builder).
    pub fn with_value(mut self, name: impl Into<String>, value: DocValue) -> Self {
        self.set_value(name, value);
        self
    }

    /// Append a child element (builder).
    pub fn with_child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_lookup() {
        let node = DocNode::new("kind")
            .with_text("x", "10")
            .with_value("background_color", DocValue::Color(Color::WHITE));
        assert_eq!(node.value("x"), Some(&DocValue::Text("10".into())));
        assert_eq!(node.value("background_color"), Some(&DocValue::Color(Color::WHITE)));
        assert!(node.value("missing").is_none());
    }

    #[test]
    fn set_value_replaces() {
        let mut node = DocNode::new("kind").with_text("x", "10");
        node.set_value("x", DocValue::Text("20".into()));
        assert_eq!(node.value("x"), Some(&DocValue::Text("20".into())));
    }

    #[test]
    fn children_nest() {
        let doc = DocNode::new("display").with_child(DocNode::new("rect"));
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].kind, "rect");
    }
}
