//! RGBA color with deterministic CSS-style serialization.

use std::fmt;

/// A color with four 8-bit channels.
///
/// Serializes as `rgb(r,g,b)` when fully opaque and `rgba(r,g,b,a)` otherwise,
/// so that a color survives a round trip through the drawing surface's string
/// form unchanged. Equality is channel-wise, which is what property change
/// listeners rely on for their "did it actually change" check.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(128, 128, 128);
    pub const TRANSPARENT: Color = Color { red: 0, green: 0, blue: 0, alpha: 0 };

    /// Create a fully opaque color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue, alpha: 255 }
    }

    /// Create a color with an explicit alpha channel.
    #[inline]
    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.alpha == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 255 {
            write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "rgba({},{},{},{})",
                self.red,
                self.green,
                self.blue,
                self.alpha as f64 / 255.0
            )
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
    fn opaque_serializes_as_rgb() {
        assert_eq!(Color::new(255, 0, 64).to_string(), "rgb(255,0,64)");
    }

    #[test]
    fn translucent_serializes_as_rgba() {
        let c = Color::with_alpha(0, 0, 0, 0);
        assert_eq!(c.to_string(), "rgba(0,0,0,0)");
        let half = Color::with_alpha(10, 20, 30, 51);
        assert_eq!(half.to_string(), "rgba(10,20,30,0.2)");
    }

    #[test]
    fn equality_is_channel_wise() {
        assert_eq!(Color::new(1, 2, 3), Color::with_alpha(1, 2, 3, 255));
        assert_ne!(Color::new(1, 2, 3), Color::with_alpha(1, 2, 3, 254));
    }

    #[test]
    fn transparency() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
