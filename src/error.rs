//! Error types for geometry and wall-planning failures.

use thiserror::Error;

/// Errors raised by the geometry primitives.
///
/// These signal a caller mistake (asking for an impossible slice) rather than
/// a condition the core ever expects to recover from.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("cannot slice rectangle with bottom-left.x = {bottom_left_x} at x = {x}: would produce a negative length")]
    NegativeSliceLength { x: f64, bottom_left_x: f64 },
}

/// Errors raised while planning the layout of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum WallPlanningError {
    #[error("course {course_index} has no brick placement with pattern length below 6 (found {min_pattern_length})")]
    ExcessiveStairOrTooth {
        course_index: usize,
        min_pattern_length: u32,
    },
    #[error("bond `{bond_name}` exhausted its retry budget of {attempts} attempt(s)")]
    RetriesExhausted {
        bond_name: &'static str,
        attempts: u32,
    },
}
