//! Geometry in normalized device coordinates.
//!
//! Regions and pointer samples share one coordinate space: `x` runs from -1
//! (left edge) to 1 (right edge) and `y` from -1 (bottom) to 1 (top). Values
//! outside that range are legal; they simply never hit a region that lies
//! entirely inside the viewport.

use std::fmt;

/// A point in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The center of the viewport (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle defined by its minimum and maximum corners.
///
/// Containment is inclusive on every edge, so two regions sharing an edge
/// both contain the points on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    /// Create a rectangle from its left, right, bottom and top edges.
    ///
    /// Edges given in the wrong order are swapped, so the result is never
    /// inverted.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self::from_corners(Point::new(left, bottom), Point::new(right, top))
    }

    /// Create a rectangle from two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// A rectangle covering the whole viewport.
    pub const FULL: Self = Self {
        min: Point { x: -1.0, y: -1.0 },
        max: Point { x: 1.0, y: 1.0 },
    };

    /// Left edge x coordinate.
    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge x coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Bottom edge y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    /// Top edge y coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Check if a point is inside the rectangle or on its boundary.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if two rectangles share any point.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_normalizes_edges() {
        let rect = Rect::new(0.5, -0.5, 0.25, -0.25);
        assert_eq!(rect.left(), -0.5);
        assert_eq!(rect.right(), 0.5);
        assert_eq!(rect.bottom(), -0.25);
        assert_eq!(rect.top(), 0.25);
        assert_eq!(rect.width(), 1.0);
        assert_eq!(rect.height(), 0.5);
        assert_eq!(rect.center(), Point::ZERO);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(-0.5, 0.5, -0.5, 0.5);
        assert!(rect.contains(Point::ZERO));
        assert!(rect.contains(Point::new(0.5, 0.5)));
        assert!(rect.contains(Point::new(-0.5, -0.5)));
        assert!(!rect.contains(Point::new(0.51, 0.0)));
        assert!(!rect.contains(Point::new(0.0, -0.6)));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(-1.0, 0.0, -1.0, 0.0);
        let b = Rect::new(0.0, 1.0, 0.0, 1.0);
        let c = Rect::new(0.1, 1.0, 0.1, 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(Rect::FULL.intersects(&c));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(0.25, -0.5).to_string(), "(0.25, -0.5)");
    }
}
