//! Bond rules: one variant per masonry pattern, each producing the next
//! brick for a (course, cursor) slot. The wild bond additionally shuffles
//! candidates and backtracks on an excessive stair/tooth.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::WallPlanningError;
use crate::geometry::Point;
use crate::units::{
    Brick, BrickSize, Course, Unit, FULL_BRICK_LENGTH, HALF_BRICK_LENGTH, HEAD_JOINT_WIDTH,
    QUARTER_BRICK_LENGTH,
};

/// Lateral offset, in millimetres, between the head joints of two courses
/// whose pattern the wild bond considers a stair or tooth step.
const STAIR_CHECK_DISTANCE: f64 = QUARTER_BRICK_LENGTH + HEAD_JOINT_WIDTH;

/// How far a stair or tooth run may extend before the wild bond gives up on
/// this course.
const MAX_PATTERN_LENGTH: u32 = 6;

/// Retry budget given to `create_wall` for the wild bond.
pub const WILD_BOND_RETRIES: u32 = 20;

// ====================
// PUBLIC STRUCTS
// ====================

/// One masonry pattern. `Stretcher`, `Cross` and `Flemish` are pure
/// functions of the course so far; `Wild` additionally owns the source of
/// randomness it shuffles candidates with.
pub enum Bond {
    Stretcher,
    Cross,
    Flemish,
    Wild { rng: StdRng },
}

impl Bond {
    pub fn stretcher() -> Self {
        Bond::Stretcher
    }

    pub fn cross() -> Self {
        Bond::Cross
    }

    pub fn flemish() -> Self {
        Bond::Flemish
    }

    /// A wild bond seeded from the system's entropy source.
    pub fn wild() -> Self {
        Bond::Wild {
            rng: StdRng::from_entropy(),
        }
    }

    /// A wild bond seeded deterministically, for reproducible tests.
    pub fn wild_with_seed(seed: u64) -> Self {
        Bond::Wild {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The token a CLI would accept for this bond; the inverse of [`Bond::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Bond::Stretcher => "stretcher",
            Bond::Cross => "cross",
            Bond::Flemish => "flemish",
            Bond::Wild { .. } => "wild",
        }
    }

    /// Parses one of the CLI bond tokens. `"wild"` is seeded from entropy.
    pub fn from_name(name: &str) -> Option<Bond> {
        match name {
            "stretcher" => Some(Bond::stretcher()),
            "cross" => Some(Bond::cross()),
            "flemish" => Some(Bond::flemish()),
            "wild" => Some(Bond::wild()),
            _ => None,
        }
    }

    /// Retry budget the wall builder should give this bond: 0 for the
    /// deterministic bonds, [`WILD_BOND_RETRIES`] for the wild bond.
    pub fn retries(&self) -> u32 {
        match self {
            Bond::Wild { .. } => WILD_BOND_RETRIES,
            _ => 0,
        }
    }

    pub(crate) fn next_brick_in_course(
        &mut self,
        course_so_far: &[Unit],
        course_index: usize,
        cursor: Point,
        wall_length: f64,
        previous_courses: &[Course],
    ) -> Result<Brick, WallPlanningError> {
        let brick = match self {
            Bond::Stretcher => stretcher_brick(course_so_far, course_index, cursor, wall_length),
            Bond::Cross => cross_brick(course_so_far, course_index, cursor, wall_length),
            Bond::Flemish => flemish_brick(course_so_far, course_index, cursor, wall_length),
            Bond::Wild { rng } => {
                return wild_brick(course_so_far, course_index, cursor, wall_length, previous_courses, rng)
            }
        };
        Ok(fit_brick_at_end(brick, wall_length))
    }
}

// ====================
// PRIVATE FUNCTIONS
// ====================

fn is_first_brick(course_so_far: &[Unit]) -> bool {
    course_so_far.is_empty()
}

fn is_odd_course(course_index: usize) -> bool {
    course_index % 2 == 1
}

/// The length, in millimetres, of the brick two units back (skipping the
/// intervening head joint), or `None` if there isn't one yet.
fn previous_brick_length(course_so_far: &[Unit]) -> Option<f64> {
    if course_so_far.len() < 2 {
        None
    } else {
        Some(course_so_far[course_so_far.len() - 2].rect().length())
    }
}

/// Slices `brick` to end exactly at `wall_length` when it would overshoot.
fn fit_brick_at_end(brick: Brick, wall_length: f64) -> Brick {
    if brick.rect().bottom_right().x > wall_length {
        let sliced = brick
            .rect()
            .slice_at_x(wall_length)
            .expect("cursor never lies past wall_length while the course loop is running");
        Brick::with_rect(brick.size(), sliced)
    } else {
        brick
    }
}

fn stretcher_brick(course_so_far: &[Unit], course_index: usize, cursor: Point, wall_length: f64) -> Brick {
    let size = if is_first_brick(course_so_far) && is_odd_course(course_index) {
        BrickSize::Half
    } else if cursor.x + FULL_BRICK_LENGTH > wall_length {
        BrickSize::Half
    } else {
        BrickSize::Full
    };
    Brick::new(size, cursor)
}

fn cross_brick(course_so_far: &[Unit], course_index: usize, cursor: Point, wall_length: f64) -> Brick {
    if is_odd_course(course_index) {
        return Brick::new(BrickSize::Half, cursor);
    }
    let size = if is_first_brick(course_so_far) {
        BrickSize::Quarter
    } else if cursor.x + FULL_BRICK_LENGTH > wall_length {
        BrickSize::Quarter
    } else {
        BrickSize::Full
    };
    Brick::new(size, cursor)
}

fn flemish_brick(course_so_far: &[Unit], course_index: usize, cursor: Point, wall_length: f64) -> Brick {
    if is_first_brick(course_so_far) {
        let size = if is_odd_course(course_index) {
            BrickSize::ThreeQuarter
        } else {
            BrickSize::Half
        };
        return Brick::new(size, cursor);
    }

    let previous_was_half = previous_brick_length(course_so_far) == Some(HALF_BRICK_LENGTH);
    let size = if previous_was_half { BrickSize::Full } else { BrickSize::Half };
    let candidate = Brick::new(size, cursor);

    if candidate.rect().bottom_right().x > wall_length {
        Brick::new(BrickSize::Quarter, cursor)
    } else {
        candidate
    }
}

fn wild_candidates(course_so_far: &[Unit], course_index: usize) -> Vec<BrickSize> {
    if is_first_brick(course_so_far) && is_odd_course(course_index) {
        return vec![BrickSize::Quarter, BrickSize::ThreeQuarter];
    }
    let previous_was_half = previous_brick_length(course_so_far) == Some(HALF_BRICK_LENGTH);
    if previous_was_half {
        vec![BrickSize::Full]
    } else {
        vec![BrickSize::Full, BrickSize::Half]
    }
}

fn wild_brick(
    course_so_far: &[Unit],
    course_index: usize,
    cursor: Point,
    wall_length: f64,
    previous_courses: &[Course],
    rng: &mut StdRng,
) -> Result<Brick, WallPlanningError> {
    let mut candidates = wild_candidates(course_so_far, course_index);
    candidates.shuffle(rng);

    let mut best: Option<(u32, BrickSize)> = None;
    for &size in &candidates {
        let end_x = cursor.x + size.length();
        let pattern_len = pattern_length(end_x, previous_courses);
        best = match best {
            None => Some((pattern_len, size)),
            Some((best_len, _)) if pattern_len < best_len => Some((pattern_len, size)),
            _ => best,
        };
    }
    let (min_pattern_length, size) = best.expect("candidate set is never empty");

    if min_pattern_length >= MAX_PATTERN_LENGTH {
        return Err(WallPlanningError::ExcessiveStairOrTooth {
            course_index,
            min_pattern_length,
        });
    }

    Ok(fit_brick_at_end(Brick::new(size, cursor), wall_length))
}

/// The longest stair or tooth run a head joint ending at `brick_end_x` would
/// extend, across the four directional modes, capped at 6.
fn pattern_length(brick_end_x: f64, previous_courses: &[Course]) -> u32 {
    let depth = previous_courses.len().min(6);
    let mut max_length = 0;

    for &initial_direction in &[1.0_f64, -1.0] {
        for &multiplier in &[1.0_f64, -1.0] {
            let mut direction = initial_direction;
            let mut check_x = brick_end_x;
            let mut found = 0u32;

            for i in 1..=depth {
                check_x += direction * STAIR_CHECK_DISTANCE;
                let course = &previous_courses[previous_courses.len() - i];
                if !course.joint_exists_at(check_x) {
                    break;
                }
                found = i as u32;
                direction *= multiplier;
            }
            max_length = max_length.max(found);
        }
    }
    max_length
}

// ====================
// TESTS
// ====================
