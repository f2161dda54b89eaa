//! Core geometry types: Point, Bounds.
//!
//! These are the foundational coordinate types used throughout opiview.
//! Everything is expressed in canvas pixels as `f64`, matching the drawing
//! surface contract; widget documents declare integer coordinates, which are
//! widened on parse.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position in canvas pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point { x: self.x + dx, y: self.y + dy }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Translate every point in a slice by `(dx, dy)`, preserving relative shape.
///
/// Used by geometry listeners to keep absolute point lists (polygons,
/// polylines) synchronized with a moving bounding box.
pub fn translate_points(points: &[Point], dx: f64, dy: f64) -> Vec<Point> {
    points.iter().map(|p| p.translate(dx, dy)).collect()
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A rectangle in canvas pixels defined by position and size.
///
/// Widgets know two of these: the *holder* bounds (the full declared bounding
/// box) and the *content* bounds (holder shrunk by border insets).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// An empty rectangle at the origin.
    pub const EMPTY: Bounds = Bounds { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// The center point.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the point lies inside this rectangle.
    #[inline]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Translate the rectangle by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f64, dy: f64) -> Bounds {
        Bounds { x: self.x + dx, y: self.y + dy, ..self }
    }

    /// Shrink by the given amount on each respective side.
    ///
    /// Width and height are clamped to zero to avoid negative dimensions.
    #[inline]
    pub fn shrink(self, top: f64, left: f64, bottom: f64, right: f64) -> Bounds {
        Bounds {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }

    /// The rectangle on which a stroke of `line_width` must be centered so
    /// that the stroked result stays inside `self`.
    #[inline]
    pub fn to_border_box(self, line_width: f64) -> Bounds {
        Bounds {
            x: self.x + line_width / 2.0,
            y: self.y + line_width / 2.0,
            width: self.width - line_width,
            height: self.height - line_width,
        }
    }

    /// Intersection with `other`, or [`Bounds::EMPTY`] when disjoint.
    pub fn intersection(self, other: Bounds) -> Bounds {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            Bounds::EMPTY
        } else {
            Bounds { x: x1, y: y1, width: x2 - x1, height: y2 - y1 }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Point
    // -----------------------------------------------------------------------

    #[test]
    fn point_add_sub() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(b - a, Point::new(2.0, 2.0));
    }

    #[test]
    fn point_translate() {
        assert_eq!(Point::new(5.0, 5.0).translate(-2.0, 3.0), Point::new(3.0, 8.0));
    }

    #[test]
    fn translate_points_preserves_shape() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)];
        let moved = translate_points(&pts, 4.0, -2.0);
        assert_eq!(moved[0], Point::new(4.0, -2.0));
        assert_eq!(moved[1] - moved[0], pts[1] - pts[0]);
        assert_eq!(moved[2] - moved[1], pts[2] - pts[1]);
    }

    // -----------------------------------------------------------------------
    // Bounds
    // -----------------------------------------------------------------------

    #[test]
    fn bounds_edges_and_center() {
        let b = Bounds::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn bounds_contains_point() {
        let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
        assert!(b.contains(5.0, 5.0));
        assert!(b.contains(14.9, 14.9));
        assert!(!b.contains(15.0, 5.0));
        assert!(!b.contains(4.9, 5.0));
    }

    #[test]
    fn bounds_shrink_per_side() {
        let b = Bounds::new(10.0, 10.0, 100.0, 50.0);
        let c = b.shrink(2.0, 2.0, 2.0, 2.0);
        assert_eq!(c, Bounds::new(12.0, 12.0, 96.0, 46.0));
    }

    #[test]
    fn bounds_shrink_clamps_to_zero() {
        let b = Bounds::new(0.0, 0.0, 4.0, 4.0);
        let c = b.shrink(10.0, 10.0, 10.0, 10.0);
        assert_eq!(c.width, 0.0);
        assert_eq!(c.height, 0.0);
    }

    #[test]
    fn bounds_border_box_centers_stroke() {
        let b = Bounds::new(10.0, 10.0, 100.0, 50.0);
        let box2 = b.to_border_box(2.0);
        assert_eq!(box2, Bounds::new(11.0, 11.0, 98.0, 48.0));
    }

    #[test]
    fn bounds_intersection() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(b), Bounds::new(5.0, 5.0, 5.0, 5.0));
        let c = Bounds::new(20.0, 20.0, 5.0, 5.0);
        assert_eq!(a.intersection(c), Bounds::EMPTY);
    }

    #[test]
    fn bounds_translate() {
        let b = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(b.translate(10.0, 20.0), Bounds::new(11.0, 22.0, 3.0, 4.0));
    }
}
