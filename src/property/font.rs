//! Font description with a derived canvas font string.

use std::fmt;

/// A font: family, pixel size, and style flags.
///
/// The [`Display`](fmt::Display) form is the canonical font-description string
/// accepted by the drawing surface, e.g. `italic bold 14px Liberation Sans`.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// Create a regular (non-bold, non-italic) font.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self { family: family.into(), size, bold: false, italic: false }
    }

    /// Set the bold flag (builder).
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the italic flag (builder).
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new("Liberation Sans", 14.0)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            write!(f, "italic ")?;
        }
        if self.bold {
            write!(f, "bold ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_font_string() {
        assert_eq!(Font::new("Arial", 12.0).to_string(), "12px Arial");
    }

    #[test]
    fn styled_font_string() {
        let f = Font::new("Liberation Sans", 14.0).bold().italic();
        assert_eq!(f.to_string(), "italic bold 14px Liberation Sans");
    }

    #[test]
    fn equality_covers_style_flags() {
        assert_ne!(Font::new("Arial", 12.0), Font::new("Arial", 12.0).bold());
        assert_eq!(Font::new("Arial", 12.0), Font::new("Arial", 12.0));
    }
}
