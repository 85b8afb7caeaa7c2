//! Turns a bond into a fully tiled [`Wall`]: iterates courses bottom to top,
//! interleaving head joints between bricks, and retries the whole attempt
//! when a bond backtracks.

use crate::bond::Bond;
use crate::error::WallPlanningError;
use crate::geometry::{Point, Rectangle};
use crate::units::{Course, Unit, Wall, BED_JOINT_THICKNESS, COURSE_HEIGHT, HEAD_JOINT_WIDTH};

/// Builds a wall of the given length and height using `bond`.
///
/// Retries up to `bond.retries()` times on [`WallPlanningError`] (the wild
/// bond backtracking on an excessive stair/tooth); once the budget is
/// exhausted the error is re-raised carrying the bond's name.
pub fn create_wall(length: f64, height: f64, bond: &mut Bond) -> Result<Wall, WallPlanningError> {
    let number_of_courses = (height / COURSE_HEIGHT).floor() as usize;
    let max_retries = bond.retries();

    let mut attempt = 0;
    loop {
        match build_courses(length, number_of_courses, bond) {
            Ok(courses) => {
                return Ok(Wall::new(Rectangle::new(Point::ORIGIN, length, height), courses));
            }
            Err(err) => {
                attempt += 1;
                if attempt > max_retries {
                    log::warn!(
                        "bond `{}` exhausted its retry budget of {} attempt(s); last failure: {}",
                        bond.name(),
                        max_retries,
                        err
                    );
                    return Err(WallPlanningError::RetriesExhausted {
                        bond_name: bond.name(),
                        attempts: max_retries,
                    });
                }
                log::debug!("wall planning attempt {} failed ({}); retrying", attempt, err);
            }
        }
    }
}

fn build_courses(length: f64, number_of_courses: usize, bond: &mut Bond) -> Result<Vec<Course>, WallPlanningError> {
    let mut courses = Vec::with_capacity(number_of_courses);
    for index in 0..number_of_courses {
        let course = build_course(index, length, bond, &courses)?;
        courses.push(course);
    }
    Ok(courses)
}

fn build_course(
    index: usize,
    length: f64,
    bond: &mut Bond,
    previous_courses: &[Course],
) -> Result<Course, WallPlanningError> {
    let mut units = Vec::new();
    let mut point = Point::new(0.0, index as f64 * COURSE_HEIGHT + BED_JOINT_THICKNESS);

    while point.x < length {
        let brick = bond.next_brick_in_course(&units, index, point, length, previous_courses)?;
        point = point.plus_x(brick.rect().length());
        units.push(Unit::from_brick(brick));

        if point.x < length {
            units.push(Unit::head_joint(point));
            point = point.plus_x(HEAD_JOINT_WIDTH);
        }
    }

    Ok(Course::new(index as f64 * COURSE_HEIGHT, units))
}

// ====================
// TESTS
// ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{BrickSize, UnitKind};

    fn brick_sizes(course: &Course) -> Vec<BrickSize> {
        course
            .units()
            .iter()
            .filter_map(|unit| match unit.kind() {
                UnitKind::Brick(size) => Some(size),
                UnitKind::HeadJoint => None,
            })
            .collect()
    }

    #[test]
    fn stretcher_wall_has_expected_course_count_and_tiling() {
        let mut bond = Bond::stretcher();
        let wall = create_wall(2300.0, 2000.0, &mut bond).unwrap();
        assert_eq!(wall.courses().len(), 32);

        for course in wall.courses() {
            assert_eq!(course.units().len(), 21);
            let last = course.units().last().unwrap();
            let second_last = &course.units()[course.units().len() - 2];

            if course.index() % 2 == 0 {
                assert!(second_last.is_head_joint());
                assert_eq!(last.rect().length(), 100.0);
                assert_eq!(last.kind(), UnitKind::Brick(BrickSize::Half));
            } else {
                assert_eq!(course.units()[0].rect().length(), 100.0);
                assert!(course.units()[1].is_head_joint());
            }
        }
    }

    #[test]
    fn cross_wall_matches_expected_unit_counts() {
        let mut bond = Bond::cross();
        let wall = create_wall(2300.0, 2000.0, &mut bond).unwrap();
        assert_eq!(wall.courses().len(), 32);

        for course in wall.courses() {
            if course.index() % 2 == 0 {
                assert_eq!(course.units().len(), 23);
                let sizes = brick_sizes(course);
                assert_eq!(*sizes.first().unwrap(), BrickSize::Quarter);
                assert_eq!(*sizes.last().unwrap(), BrickSize::Quarter);
                assert!(sizes[1..sizes.len() - 1].iter().all(|&s| s == BrickSize::Full));
            } else {
                assert_eq!(course.units().len(), 41);
                assert!(brick_sizes(course).iter().all(|&s| s == BrickSize::Half));
            }
        }
    }

    #[test]
    fn flemish_wall_matches_expected_unit_counts_and_ending() {
        let mut bond = Bond::flemish();
        let wall = create_wall(2300.0, 2000.0, &mut bond).unwrap();
        assert_eq!(wall.courses().len(), 32);

        for course in wall.courses() {
            let last = course.units().last().unwrap();
            if course.index() % 2 == 0 {
                assert_eq!(course.units().len(), 27);
                assert_eq!(*brick_sizes(course).first().unwrap(), BrickSize::Half);
                assert_eq!(last.rect().bottom_right().x, 2300.0);
            } else {
                assert_eq!(course.units().len(), 29);
                assert_eq!(*brick_sizes(course).first().unwrap(), BrickSize::ThreeQuarter);
                assert_eq!(last.rect().length(), 45.0);
                assert_eq!(last.rect().bottom_right().x, 2300.0);
            }
        }
    }

    #[test]
    fn wall_course_count_is_floor_of_height_over_course_height() {
        let mut bond = Bond::stretcher();
        let wall = create_wall(2300.0, 2000.0, &mut bond).unwrap();
        assert_eq!(wall.courses().len(), (2000.0_f64 / COURSE_HEIGHT).floor() as usize);
    }

    #[test]
    fn every_course_tiles_the_full_wall_length() {
        let mut bond = Bond::cross();
        let wall = create_wall(2300.0, 2000.0, &mut bond).unwrap();
        for course in wall.courses() {
            let first = course.units().first().unwrap();
            let last = course.units().last().unwrap();
            assert_eq!(first.rect().bottom_left().x, 0.0);
            assert_eq!(last.rect().bottom_right().x, 2300.0);
        }
    }

    #[test]
    fn wild_wall_either_succeeds_or_exhausts_retries() {
        for seed in 0..20 {
            let mut bond = Bond::wild_with_seed(seed);
            match create_wall(2300.0, 2000.0, &mut bond) {
                Ok(wall) => assert_eq!(wall.courses().len(), 32),
                Err(WallPlanningError::RetriesExhausted { bond_name, attempts }) => {
                    assert_eq!(bond_name, "wild");
                    assert_eq!(attempts, crate::bond::WILD_BOND_RETRIES);
                }
                Err(other) => panic!("unexpected error variant: {other}"),
            }
        }
    }
}
