//! Plans how a stationary bricklaying robot builds a brick wall course by
//! course in a chosen masonry bond.
//!
//! Coordinates are millimetres in a single vertical plane: the origin sits
//! at a wall's bottom-left corner, +x runs right and +y runs up. A caller
//! picks a [`Bond`], calls [`create_wall`] to synthesise the tiling, builds
//! a [`Robot`] around a [`MoveStrategy`] (which owns an [`AlignmentStrategy`]),
//! and drives it with [`drive_to_completion`] or by calling
//! [`Robot::lay_brick`] and [`Robot::reposition`] directly.

mod bond;
mod builder;
mod error;
mod geometry;
mod robot;
mod strategy;
mod units;

pub use bond::{Bond, WILD_BOND_RETRIES};
pub use builder::create_wall;
pub use error::{GeometryError, WallPlanningError};
pub use geometry::{Point, Rectangle};
pub use robot::{drive_to_completion, Robot};
pub use strategy::{AlignmentStrategy, MoveStrategy};
pub use units::{
    Brick, BrickSize, Course, Unit, UnitKind, Wall, BED_JOINT_THICKNESS, BRICK_HEIGHT, COURSE_HEIGHT,
    FULL_BRICK_LENGTH, HALF_BRICK_LENGTH, HEAD_JOINT_WIDTH, QUARTER_BRICK_LENGTH,
    THREE_QUARTER_BRICK_LENGTH,
};
