//! Typed, self-describing property model.
//!
//! Every widget declares its full property schema up front as a
//! [`PropertySet`]: an ordered collection of named, typed cells with defaults.
//! Document parsing, programmatic writes, and change notification all flow
//! through the same typed validation. Access to an undeclared name is a
//! programming defect ([`SchemaError`]) and fails loudly; malformed document
//! values are a runtime condition and silently keep the default.

pub mod color;
pub mod font;
pub mod value;

pub use color::Color;
pub use font::Font;
pub use value::{PropType, PropValue};

use std::fmt;
use std::rc::Rc;

use crate::action::ActionSet;
use crate::document::DocNode;
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A schema violation: the property model was used against its declaration.
///
/// This is always a code defect, never a condition of the input document, so
/// the infallible accessors panic with this message rather than returning it.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("no such property: {0}")]
    Undeclared(String),
    #[error("property {name} is {expected:?}, cannot hold {got:?}")]
    TypeMismatch {
        name: String,
        expected: PropType,
        got: PropType,
    },
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

/// A change listener: `(set, new, old)`.
///
/// Listeners run synchronously and may themselves write other properties of
/// the same set. Writes that loop back into the property that is currently
/// notifying are applied without re-notification, which bounds propagation.
pub type Listener = Rc<dyn Fn(&mut PropertySet, &PropValue, &PropValue)>;

/// A named, typed cell with a default value and change listeners.
///
/// The type never changes after construction.
pub struct Property {
    name: String,
    ptype: PropType,
    value: PropValue,
    default: PropValue,
    listeners: Vec<Listener>,
}

impl Property {
    fn new(name: impl Into<String>, default: PropValue) -> Self {
        Self {
            name: name.into(),
            ptype: default.prop_type(),
            value: default.clone(),
            default,
            listeners: Vec::new(),
        }
    }

    pub fn int(name: impl Into<String>, default: i64) -> Self {
        Self::new(name, PropValue::Int(default))
    }

    pub fn float(name: impl Into<String>, default: f64) -> Self {
        Self::new(name, PropValue::Float(default))
    }

    pub fn bool(name: impl Into<String>, default: bool) -> Self {
        Self::new(name, PropValue::Bool(default))
    }

    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(name, PropValue::Str(default.into()))
    }

    pub fn color(name: impl Into<String>, default: Color) -> Self {
        Self::new(name, PropValue::Color(default))
    }

    pub fn font(name: impl Into<String>, default: Font) -> Self {
        Self::new(name, PropValue::Font(default))
    }

    pub fn points(name: impl Into<String>, default: Vec<Point>) -> Self {
        Self::new(name, PropValue::Points(default))
    }

    pub fn actions(name: impl Into<String>, default: ActionSet) -> Self {
        Self::new(name, PropValue::Actions(default))
    }

    /// The property name, unique within its set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    pub fn prop_type(&self) -> PropType {
        self.ptype
    }

    /// The current value.
    pub fn value(&self) -> &PropValue {
        &self.value
    }

    /// The declared default.
    pub fn default(&self) -> &PropValue {
        &self.default
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type", &self.ptype)
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PropertySet
// ---------------------------------------------------------------------------

/// An ordered mapping from property name to [`Property`].
///
/// Insertion order is declaration order and drives deterministic iteration.
/// Owned exclusively by its widget node.
#[derive(Debug, Default)]
pub struct PropertySet {
    props: Vec<Property>,
    /// Names currently mid-notification; writes to these are applied without
    /// invoking listeners so that re-entrant cascades terminate.
    in_flight: Vec<String>,
}

impl PropertySet {
    /// Create a set from an initial schema.
    pub fn new(props: Vec<Property>) -> Self {
        let mut set = Self::default();
        for p in props {
            set.add(p);
        }
        set
    }

    /// Declare an additional property. Names must be unique.
    pub fn add(&mut self, prop: Property) {
        assert!(
            self.position(prop.name()).is_none(),
            "duplicate property declaration: {}",
            prop.name()
        );
        self.props.push(prop);
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.props.iter().position(|p| p.name == name)
    }

    /// Whether `name` is declared.
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|p| p.name.as_str())
    }

    /// Look up a declared property.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.position(name).map(|i| &self.props[i])
    }

    /// Current value of a declared property.
    pub fn try_value(&self, name: &str) -> Result<&PropValue, SchemaError> {
        self.property(name)
            .map(|p| &p.value)
            .ok_or_else(|| SchemaError::Undeclared(name.to_owned()))
    }

    /// Current value of a declared property; panics on an undeclared name.
    pub fn value(&self, name: &str) -> &PropValue {
        match self.try_value(name) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    // -- typed accessors

    pub fn int(&self, name: &str) -> i64 {
        self.value(name).as_int()
    }

    pub fn float(&self, name: &str) -> f64 {
        self.value(name).as_float()
    }

    pub fn bool(&self, name: &str) -> bool {
        self.value(name).as_bool()
    }

    pub fn str(&self, name: &str) -> &str {
        self.value(name).as_str()
    }

    pub fn color(&self, name: &str) -> Color {
        self.value(name).as_color()
    }

    pub fn font(&self, name: &str) -> &Font {
        self.value(name).as_font()
    }

    pub fn points(&self, name: &str) -> &[Point] {
        self.value(name).as_points()
    }

    pub fn actions(&self, name: &str) -> &ActionSet {
        self.value(name).as_actions()
    }

    /// Register a change listener on a declared property.
    pub fn listen(
        &mut self,
        name: &str,
        listener: impl Fn(&mut PropertySet, &PropValue, &PropValue) + 'static,
    ) {
        match self.position(name) {
            Some(i) => self.props[i].listeners.push(Rc::new(listener)),
            None => panic!("{}", SchemaError::Undeclared(name.to_owned())),
        }
    }

    /// Write a property, with the same typed validation as parsing.
    ///
    /// Returns whether the value actually changed. Listeners are invoked
    /// synchronously with `(new, old)` only on an actual change, and only
    /// when the property is not already mid-notification.
    pub fn set(&mut self, name: &str, value: PropValue) -> Result<bool, SchemaError> {
        let idx = self
            .position(name)
            .ok_or_else(|| SchemaError::Undeclared(name.to_owned()))?;
        let prop = &self.props[idx];
        if value.prop_type() != prop.ptype {
            return Err(SchemaError::TypeMismatch {
                name: name.to_owned(),
                expected: prop.ptype,
                got: value.prop_type(),
            });
        }
        if prop.value == value {
            return Ok(false);
        }

        let old = std::mem::replace(&mut self.props[idx].value, value.clone());

        // Re-entrant write into the property currently notifying: apply the
        // value, skip notification. This is the forward-progress guarantee.
        if self.in_flight.iter().any(|n| n == name) {
            return Ok(true);
        }

        let listeners = self.props[idx].listeners.clone();
        if !listeners.is_empty() {
            self.in_flight.push(name.to_owned());
            for listener in &listeners {
                listener(self, &value, &old);
            }
            self.in_flight.pop();
        }
        Ok(true)
    }

    /// Load values from a document element.
    ///
    /// Walks the declared set in order; names present in the document are
    /// parsed against the declared type and assigned through [`Self::set`]
    /// (so listeners see real changes). Values absent from the document, and
    /// malformed values, keep the declared default.
    pub fn load(&mut self, node: &DocNode) {
        for i in 0..self.props.len() {
            let name = self.props[i].name.clone();
            let ptype = self.props[i].ptype;
            if let Some(raw) = node.value(&name) {
                if let Some(parsed) = PropValue::parse(ptype, raw) {
                    // Name and type were just validated against the schema.
                    let _ = self.set(&name, parsed);
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
