//! Bricks, head joints, courses and the wall they tile: the build-state
//! model that bonds populate and the robot mutates one `is_built` flag at a
//! time.

use std::cell::Cell;

use crate::geometry::{Point, Rectangle};

// ====================
// CONSTANTS
// ====================

pub const FULL_BRICK_LENGTH: f64 = 210.0;
pub const THREE_QUARTER_BRICK_LENGTH: f64 = 155.0;
pub const HALF_BRICK_LENGTH: f64 = 100.0;
pub const QUARTER_BRICK_LENGTH: f64 = 45.0;
pub const HEAD_JOINT_WIDTH: f64 = 10.0;
pub const BRICK_HEIGHT: f64 = 50.0;
pub const BED_JOINT_THICKNESS: f64 = 12.5;
pub const COURSE_HEIGHT: f64 = BRICK_HEIGHT + BED_JOINT_THICKNESS;

// ====================
// PUBLIC STRUCTS
// ====================

/// One of the four lengths a brick may be cut to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrickSize {
    Full,
    ThreeQuarter,
    Half,
    Quarter,
}

impl BrickSize {
    pub fn length(&self) -> f64 {
        match self {
            BrickSize::Full => FULL_BRICK_LENGTH,
            BrickSize::ThreeQuarter => THREE_QUARTER_BRICK_LENGTH,
            BrickSize::Half => HALF_BRICK_LENGTH,
            BrickSize::Quarter => QUARTER_BRICK_LENGTH,
        }
    }
}

/// A brick as produced by a bond: a rectangle tagged with its nominal size.
///
/// The rectangle's actual length may differ from `size.length()` when the
/// bond sliced it to fit the wall's right edge; `size` still names the
/// brick this slot was conceptually laying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brick {
    rect: Rectangle,
    size: BrickSize,
}

impl Brick {
    pub(crate) fn new(size: BrickSize, bottom_left: Point) -> Self {
        Brick {
            rect: Rectangle::new(bottom_left, size.length(), BRICK_HEIGHT),
            size,
        }
    }

    pub(crate) fn with_rect(size: BrickSize, rect: Rectangle) -> Self {
        Brick { rect, size }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn size(&self) -> BrickSize {
        self.size
    }
}

/// A brick or a head joint placed within a course.
#[derive(Debug)]
pub struct Unit {
    rect: Rectangle,
    kind: UnitKind,
    is_built: Cell<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Brick(BrickSize),
    HeadJoint,
}

impl Unit {
    pub(crate) fn from_brick(brick: Brick) -> Self {
        Unit {
            rect: brick.rect(),
            kind: UnitKind::Brick(brick.size()),
            is_built: Cell::new(false),
        }
    }

    pub(crate) fn head_joint(bottom_left: Point) -> Self {
        Unit {
            rect: Rectangle::new(bottom_left, HEAD_JOINT_WIDTH, BRICK_HEIGHT),
            kind: UnitKind::HeadJoint,
            is_built: Cell::new(false),
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn is_brick(&self) -> bool {
        matches!(self.kind, UnitKind::Brick(_))
    }

    pub fn is_head_joint(&self) -> bool {
        matches!(self.kind, UnitKind::HeadJoint)
    }

    pub fn is_built(&self) -> bool {
        self.is_built.get()
    }

    pub(crate) fn mark_built(&self) {
        self.is_built.set(true);
    }

    pub(crate) fn as_brick(&self) -> Option<Brick> {
        match self.kind {
            UnitKind::Brick(size) => Some(Brick::with_rect(size, self.rect)),
            UnitKind::HeadJoint => None,
        }
    }

    /// True iff this unit's x-interval overlaps `upper`'s x-interval.
    pub fn supports(&self, upper: &Unit) -> bool {
        self.rect.overlaps_in_x_axis(&upper.rect)
    }

    /// For the bottom course, always true; otherwise every unit below that
    /// supports this one must already be built.
    pub fn is_supported(&self, course_below: Option<&Course>) -> bool {
        match course_below {
            None => true,
            Some(course) => course
                .units
                .iter()
                .all(|below| !below.supports(self) || below.is_built()),
        }
    }
}

/// A single horizontal row: bricks and head joints tiling `[0, wall_length]`.
#[derive(Debug)]
pub struct Course {
    height: f64,
    units: Vec<Unit>,
    is_built_cache: Cell<bool>,
}

impl Course {
    pub(crate) fn new(height: f64, units: Vec<Unit>) -> Self {
        Course {
            height,
            units,
            is_built_cache: Cell::new(false),
        }
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn index(&self) -> usize {
        (self.height / COURSE_HEIGHT).floor() as usize
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Memoises once every unit becomes built: a one-shot latch, since
    /// `is_built` never reverts.
    pub fn is_built(&self) -> bool {
        if self.is_built_cache.get() {
            return true;
        }
        let built = self.units.iter().all(|unit| unit.is_built());
        if built {
            self.is_built_cache.set(true);
        }
        built
    }

    /// True iff some unit at that slot is a head joint whose bottom-left x
    /// equals `x` exactly.
    pub fn joint_exists_at(&self, x: f64) -> bool {
        self.units
            .iter()
            .any(|unit| unit.is_head_joint() && unit.rect().bottom_left().x == x)
    }
}

/// The wall under construction: its bounding box and its courses, bottom to top.
#[derive(Debug)]
pub struct Wall {
    rect: Rectangle,
    courses: Vec<Course>,
    is_built_cache: Cell<bool>,
}

impl Wall {
    pub(crate) fn new(rect: Rectangle, courses: Vec<Course>) -> Self {
        Wall {
            rect,
            courses,
            is_built_cache: Cell::new(false),
        }
    }

    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub fn length(&self) -> f64 {
        self.rect.length()
    }

    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The lowest course not yet fully built, or `None`; memoises completion.
    pub fn next_non_complete_course(&self) -> Option<&Course> {
        if self.is_built_cache.get() {
            return None;
        }
        for course in &self.courses {
            if !course.is_built() {
                return Some(course);
            }
        }
        self.is_built_cache.set(true);
        None
    }
}

// ====================
// TESTS
// ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn brick_unit(x: f64, length: f64) -> Unit {
        Unit::from_brick(Brick::with_rect(
            BrickSize::Full,
            Rectangle::new(Point::new(x, 0.0), length, BRICK_HEIGHT),
        ))
    }

    #[test]
    fn is_supported_true_for_bottom_course() {
        let unit = brick_unit(0.0, 210.0);
        assert!(unit.is_supported(None));
    }

    #[test]
    fn is_supported_false_until_every_supporting_unit_below_is_built() {
        let left_below = brick_unit(0.0, 100.0);
        let right_below = brick_unit(100.0, 110.0);
        let below = Course::new(0.0, vec![left_below, right_below]);

        let above = brick_unit(50.0, 150.0); // overlaps both units below in x

        assert!(!above.is_supported(Some(&below)));

        below.units()[0].mark_built();
        assert!(!above.is_supported(Some(&below)));

        below.units()[1].mark_built();
        assert!(above.is_supported(Some(&below)));
    }

    #[test]
    fn course_is_built_latches_once_true() {
        let units = vec![brick_unit(0.0, 210.0), brick_unit(220.0, 210.0)];
        let course = Course::new(0.0, units);
        assert!(!course.is_built());
        course.units()[0].mark_built();
        course.units()[1].mark_built();
        assert!(course.is_built());
        assert!(course.is_built());
    }

    #[test]
    fn course_index_derives_from_height() {
        let course = Course::new(2.0 * COURSE_HEIGHT, vec![]);
        assert_eq!(course.index(), 2);
    }

    #[test]
    fn joint_exists_at_matches_exact_x() {
        let joint = Unit::head_joint(Point::new(210.0, 0.0));
        let course = Course::new(0.0, vec![joint]);
        assert!(course.joint_exists_at(210.0));
        assert!(!course.joint_exists_at(211.0));
    }

    #[test]
    fn wall_next_non_complete_course_memoises() {
        let built_course = Course::new(0.0, vec![]);
        let unbuilt_course = Course::new(COURSE_HEIGHT, vec![brick_unit(0.0, 210.0)]);
        let wall = Wall::new(
            Rectangle::new(Point::ORIGIN, 210.0, 2.0 * COURSE_HEIGHT),
            vec![built_course, unbuilt_course],
        );

        let next = wall.next_non_complete_course().unwrap();
        assert_eq!(next.height(), COURSE_HEIGHT);

        next.units()[0].mark_built();
        assert!(wall.next_non_complete_course().is_none());
        assert!(wall.next_non_complete_course().is_none());
    }
}
