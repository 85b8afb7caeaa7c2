//! Axis-aligned geometry shared by the unit model, bonds and strategies.
//!
//! Everything lives in a single vertical plane, in millimetres, with the
//! origin at a wall's bottom-left corner: +x right, +y up.

use crate::error::GeometryError;

// ====================
// PUBLIC STRUCTS
// ====================

/// An immutable point in the wall plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn plus_x(&self, distance: f64) -> Point {
        Point::new(self.x + distance, self.y)
    }

    pub fn plus_y(&self, distance: f64) -> Point {
        Point::new(self.x, self.y + distance)
    }
}

/// An immutable axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    bottom_left: Point,
    length: f64,
    height: f64,
}

impl Rectangle {
    pub fn new(bottom_left: Point, length: f64, height: f64) -> Self {
        Rectangle {
            bottom_left,
            length,
            height,
        }
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn top_left(&self) -> Point {
        self.bottom_left.plus_y(self.height)
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_left.plus_x(self.length)
    }

    pub fn top_right(&self) -> Point {
        self.bottom_left.plus_x(self.length).plus_y(self.height)
    }

    pub fn middle(&self) -> Point {
        self.bottom_left
            .plus_x(self.length / 2.0)
            .plus_y(self.height / 2.0)
    }

    /// Closed-interval containment of `other`'s bottom-left and top-right corners.
    pub fn bounds(&self, other: &Rectangle) -> bool {
        self.bounds_point(other.bottom_left()) && self.bounds_point(other.top_right())
    }

    /// Open half-plane disjointness: rectangles that merely touch at a shared
    /// x do **not** overlap. Bricks in adjacent columns share a boundary x and
    /// must never be treated as mutually supporting.
    pub fn overlaps_in_x_axis(&self, other: &Rectangle) -> bool {
        self.bottom_right().x > other.bottom_left().x && self.bottom_left().x < other.bottom_right().x
    }

    /// A rectangle with the same bottom-left, with length clamped to
    /// `min(length, x - bottom_left.x)`.
    pub fn slice_at_x(&self, x: f64) -> Result<Rectangle, GeometryError> {
        let available = x - self.bottom_left.x;
        if available < 0.0 {
            return Err(GeometryError::NegativeSliceLength {
                x,
                bottom_left_x: self.bottom_left.x,
            });
        }
        Ok(Rectangle::new(self.bottom_left, self.length.min(available), self.height))
    }

    fn bounds_point(&self, point: Point) -> bool {
        self.bounds_x(point.x) && self.bounds_y(point.y)
    }

    fn bounds_x(&self, x: f64) -> bool {
        self.bottom_left.x <= x && x <= self.bottom_right().x
    }

    fn bounds_y(&self, y: f64) -> bool {
        self.bottom_left.y <= y && y <= self.top_left().y
    }
}

// ====================
// TESTS
// ====================
