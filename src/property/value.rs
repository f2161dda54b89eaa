//! Typed property values and document-value parsing.

use tracing::debug;

use crate::action::ActionSet;
use crate::document::DocValue;
use crate::geometry::Point;

use super::{Color, Font};

// ---------------------------------------------------------------------------
// PropType / PropValue
// ---------------------------------------------------------------------------

/// The closed catalog of property value types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PropType {
    Int,
    Float,
    Bool,
    Str,
    Color,
    Font,
    Points,
    Actions,
}

/// A typed property value.
///
/// Equality is structural; the property model relies on it to decide whether
/// a write actually changed anything before invoking listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Color(Color),
    Font(Font),
    Points(Vec<Point>),
    Actions(ActionSet),
}

impl PropValue {
    /// The type this value belongs to.
    pub fn prop_type(&self) -> PropType {
        match self {
            PropValue::Int(_) => PropType::Int,
            PropValue::Float(_) => PropType::Float,
            PropValue::Bool(_) => PropType::Bool,
            PropValue::Str(_) => PropType::Str,
            PropValue::Color(_) => PropType::Color,
            PropValue::Font(_) => PropType::Font,
            PropValue::Points(_) => PropType::Points,
            PropValue::Actions(_) => PropType::Actions,
        }
    }

    /// Parse a document value against a declared type.
    ///
    /// Malformed or mismatched values yield `None`; the caller keeps the
    /// declared default in that case. This is a runtime condition of the
    /// input document, never a schema error.
    pub fn parse(ptype: PropType, raw: &DocValue) -> Option<PropValue> {
        let parsed = match (ptype, raw) {
            (PropType::Int, DocValue::Text(s)) => s.trim().parse().ok().map(PropValue::Int),
            (PropType::Float, DocValue::Text(s)) => s.trim().parse().ok().map(PropValue::Float),
            (PropType::Bool, DocValue::Text(s)) => match s.trim() {
                "true" | "TRUE" | "True" | "1" => Some(PropValue::Bool(true)),
                "false" | "FALSE" | "False" | "0" => Some(PropValue::Bool(false)),
                _ => None,
            },
            (PropType::Str, DocValue::Text(s)) => Some(PropValue::Str(s.clone())),
            (PropType::Color, DocValue::Color(c)) => Some(PropValue::Color(*c)),
            (PropType::Font, DocValue::Font(f)) => Some(PropValue::Font(f.clone())),
            (PropType::Points, DocValue::Points(p)) => Some(PropValue::Points(p.clone())),
            (PropType::Actions, DocValue::Actions(a)) => Some(PropValue::Actions(a.clone())),
            _ => None,
        };
        if parsed.is_none() {
            debug!(?ptype, ?raw, "document value does not match declared type");
        }
        parsed
    }

    // -- typed readers; a wrong-type read is a schema defect, so these are loud

    pub fn as_int(&self) -> i64 {
        match self {
            PropValue::Int(v) => *v,
            other => panic!("expected int property value, got {other:?}"),
        }
    }

    pub fn as_float(&self) -> f64 {
        match self {
            PropValue::Float(v) => *v,
            other => panic!("expected float property value, got {other:?}"),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            PropValue::Bool(v) => *v,
            other => panic!("expected bool property value, got {other:?}"),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PropValue::Str(v) => v,
            other => panic!("expected string property value, got {other:?}"),
        }
    }

    pub fn as_color(&self) -> Color {
        match self {
            PropValue::Color(v) => *v,
            other => panic!("expected color property value, got {other:?}"),
        }
    }

    pub fn as_font(&self) -> &Font {
        match self {
            PropValue::Font(v) => v,
            other => panic!("expected font property value, got {other:?}"),
        }
    }

    pub fn as_points(&self) -> &[Point] {
        match self {
            PropValue::Points(v) => v,
            other => panic!("expected points property value, got {other:?}"),
        }
    }

    pub fn as_actions(&self) -> &ActionSet {
        match self {
            PropValue::Actions(v) => v,
            other => panic!("expected actions property value, got {other:?}"),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_primitives_from_text() {
        assert_eq!(
            PropValue::parse(PropType::Int, &DocValue::Text("42".into())),
            Some(PropValue::Int(42))
        );
        assert_eq!(
            PropValue::parse(PropType::Float, &DocValue::Text("2.5".into())),
            Some(PropValue::Float(2.5))
        );
        assert_eq!(
            PropValue::parse(PropType::Bool, &DocValue::Text("true".into())),
            Some(PropValue::Bool(true))
        );
        assert_eq!(
            PropValue::parse(PropType::Bool, &DocValue::Text("0".into())),
            Some(PropValue::Bool(false))
        );
        assert_eq!(
            PropValue::parse(PropType::Str, &DocValue::Text("hello".into())),
            Some(PropValue::Str("hello".into()))
        );
    }

    #[test]
    fn parse_structured_values() {
        assert_eq!(
            PropValue::parse(PropType::Color, &DocValue::Color(Color::WHITE)),
            Some(PropValue::Color(Color::WHITE))
        );
        let pts = vec![Point::new(1.0, 2.0)];
        assert_eq!(
            PropValue::parse(PropType::Points, &DocValue::Points(pts.clone())),
            Some(PropValue::Points(pts))
        );
    }

    #[test]
    fn malformed_text_yields_none() {
        assert_eq!(PropValue::parse(PropType::Int, &DocValue::Text("abc".into())), None);
        assert_eq!(PropValue::parse(PropType::Bool, &DocValue::Text("maybe".into())), None);
    }

    #[test]
    fn type_mismatch_yields_none() {
        assert_eq!(PropValue::parse(PropType::Color, &DocValue::Text("red".into())), None);
        assert_eq!(
            PropValue::parse(PropType::Int, &DocValue::Color(Color::BLACK)),
            None
        );
    }

    #[test]
    fn prop_type_roundtrip() {
        assert_eq!(PropValue::Int(1).prop_type(), PropType::Int);
        assert_eq!(PropValue::Points(vec![]).prop_type(), PropType::Points);
    }

    #[test]
    #[should_panic(expected = "expected int property value")]
    fn wrong_typed_reader_is_loud() {
        PropValue::Bool(true).as_int();
    }
}
