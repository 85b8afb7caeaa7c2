//! Alignment strategies (how a reach rectangle is horizontally positioned
//! against a target unit) and move strategies (which unbuilt unit is chosen
//! next), composed by the robot.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::{Point, Rectangle};
use crate::units::{Unit, Wall, BED_JOINT_THICKNESS};

// ====================
// PUBLIC STRUCTS
// ====================

/// How a new reach rectangle is horizontally positioned relative to the
/// next unbuilt unit.
pub enum AlignmentStrategy {
    Left,
    Right,
    Center,
    Random(StdRng),
}

impl AlignmentStrategy {
    pub fn left() -> Self {
        AlignmentStrategy::Left
    }

    pub fn right() -> Self {
        AlignmentStrategy::Right
    }

    pub fn center() -> Self {
        AlignmentStrategy::Center
    }

    pub fn random() -> Self {
        AlignmentStrategy::Random(StdRng::from_entropy())
    }

    pub fn random_with_seed(seed: u64) -> Self {
        AlignmentStrategy::Random(StdRng::seed_from_u64(seed))
    }

    /// Parses one of the CLI alignment tokens.
    pub fn from_name(name: &str) -> Option<AlignmentStrategy> {
        match name {
            "left" => Some(AlignmentStrategy::left()),
            "right" => Some(AlignmentStrategy::right()),
            "center" => Some(AlignmentStrategy::center()),
            "random" => Some(AlignmentStrategy::random()),
            _ => None,
        }
    }

    /// The default alignment strategy for a bond when the caller doesn't
    /// pick one: `right` for `flemish`, `center` otherwise.
    pub fn default_for_bond(bond_name: &str) -> AlignmentStrategy {
        if bond_name == "flemish" {
            AlignmentStrategy::right()
        } else {
            AlignmentStrategy::center()
        }
    }

    fn align_x_with_unit(&mut self, unit: &Unit, reach: Rectangle) -> f64 {
        let left_x = unit.rect().bottom_left().x;
        let right_x = unit.rect().bottom_left().x + unit.rect().length() - reach.length();
        match self {
            AlignmentStrategy::Left => left_x,
            AlignmentStrategy::Right => right_x,
            AlignmentStrategy::Center => left_x + unit.rect().length() / 2.0 - reach.length() / 2.0,
            AlignmentStrategy::Random(rng) => rng.gen_range(right_x..=left_x),
        }
    }

    /// Computes the robot's next reach rectangle, positioned against `unit`.
    pub fn next_reachable_area(&mut self, unit: &Unit, reach: Rectangle, wall: &Wall) -> Rectangle {
        let max_x = wall.length() - reach.length();
        let max_y = wall.height() - reach.height();

        let next_x = self.align_x_with_unit(unit, reach).max(0.0).min(max_x);
        let next_y = (unit.rect().bottom_left().y - BED_JOINT_THICKNESS).min(max_y);

        Rectangle::new(Point::new(next_x, next_y), reach.length(), reach.height())
    }
}

/// Which unbuilt unit the robot advances to next.
pub enum MoveStrategy {
    LeftToRight(AlignmentStrategy),
    OutsideIn {
        alignment: AlignmentStrategy,
        from_left_side: bool,
    },
    Snake {
        alignment: AlignmentStrategy,
        from_left_side: bool,
        last_course_index: usize,
    },
    DynamicSnake {
        alignment: AlignmentStrategy,
    },
}

impl MoveStrategy {
    pub fn left_to_right(alignment: AlignmentStrategy) -> Self {
        MoveStrategy::LeftToRight(alignment)
    }

    pub fn outside_in(alignment: AlignmentStrategy) -> Self {
        MoveStrategy::OutsideIn {
            alignment,
            from_left_side: true,
        }
    }

    pub fn snake(alignment: AlignmentStrategy) -> Self {
        MoveStrategy::Snake {
            alignment,
            from_left_side: true,
            last_course_index: 0,
        }
    }

    pub fn dynamic_snake(alignment: AlignmentStrategy) -> Self {
        MoveStrategy::DynamicSnake { alignment }
    }

    /// Parses one of the CLI move-strategy tokens.
    pub fn from_name(name: &str, alignment: AlignmentStrategy) -> Option<MoveStrategy> {
        match name {
            "left_to_right" => Some(MoveStrategy::left_to_right(alignment)),
            "outside_in" => Some(MoveStrategy::outside_in(alignment)),
            "snake" => Some(MoveStrategy::snake(alignment)),
            "dynamic_snake" => Some(MoveStrategy::dynamic_snake(alignment)),
            _ => None,
        }
    }

    /// The robot's next reach position, or `None` if the wall is complete or
    /// no ordering can find an unbuilt unit in the current course.
    pub fn next_move(&mut self, reach: Rectangle, wall: &Wall) -> Option<Rectangle> {
        let course = wall.next_non_complete_course()?;
        let units = course.units();

        match self {
            MoveStrategy::LeftToRight(alignment) => {
                let unit = units.iter().find(|unit| !unit.is_built())?;
                Some(alignment.next_reachable_area(unit, reach, wall))
            }
            MoveStrategy::OutsideIn { alignment, from_left_side } => {
                *from_left_side = !*from_left_side;
                let unit = first_unbuilt(units, *from_left_side)?;
                Some(alignment.next_reachable_area(unit, reach, wall))
            }
            MoveStrategy::Snake {
                alignment,
                from_left_side,
                last_course_index,
            } => {
                if course.index() > *last_course_index {
                    *from_left_side = !*from_left_side;
                    *last_course_index = course.index();
                }
                let unit = first_unbuilt(units, *from_left_side)?;
                Some(alignment.next_reachable_area(unit, reach, wall))
            }
            MoveStrategy::DynamicSnake { alignment } => {
                let left_offset = units.iter().position(|unit| !unit.is_built())?;
                let right_offset = units.iter().rev().position(|unit| !unit.is_built())?;

                // Sign convention fixed by the source this was derived from:
                // right offset > left offset means traverse right-to-left.
                if right_offset > left_offset {
                    *alignment = AlignmentStrategy::left();
                    let unit = units.iter().rev().find(|unit| !unit.is_built())?;
                    Some(alignment.next_reachable_area(unit, reach, wall))
                } else {
                    *alignment = AlignmentStrategy::right();
                    let unit = units.iter().find(|unit| !unit.is_built())?;
                    Some(alignment.next_reachable_area(unit, reach, wall))
                }
            }
        }
    }
}

// ====================
// PRIVATE FUNCTIONS
// ====================

fn first_unbuilt(units: &[Unit], from_left_side: bool) -> Option<&Unit> {
    if from_left_side {
        units.iter().find(|unit| !unit.is_built())
    } else {
        units.iter().rev().find(|unit| !unit.is_built())
    }
}

// ====================
// TESTS
// ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Brick, BrickSize, Course};

    fn unit_at(x: f64, length: f64) -> Unit {
        Unit::from_brick(Brick::with_rect(
            BrickSize::Full,
            Rectangle::new(Point::new(x, 12.5), length, 50.0),
        ))
    }

    #[test]
    fn alignment_math_matches_scenario() {
        let unit = Unit::from_brick(Brick::with_rect(
            BrickSize::Full,
            Rectangle::new(Point::new(14.0, 12.5), 2.0, 10.0),
        ));
        let reach = Rectangle::new(Point::ORIGIN, 10.0, 10.0);
        let wall = Wall::new(Rectangle::new(Point::ORIGIN, 1000.0, 1000.0), vec![]);

        let left = AlignmentStrategy::left().next_reachable_area(&unit, reach, &wall);
        assert_eq!(left.bottom_left(), Point::new(14.0, 0.0));

        let right = AlignmentStrategy::right().next_reachable_area(&unit, reach, &wall);
        assert_eq!(right.bottom_left(), Point::new(6.0, 0.0));

        let center = AlignmentStrategy::center().next_reachable_area(&unit, reach, &wall);
        assert_eq!(center.bottom_left(), Point::new(10.0, 0.0));

        let random = AlignmentStrategy::random_with_seed(7).next_reachable_area(&unit, reach, &wall);
        assert!(random.bottom_left().x >= 6.0 && random.bottom_left().x <= 14.0);
    }

    #[test]
    fn outside_in_stride_sequence_matches_scenario() {
        let mut bond = crate::bond::Bond::stretcher();
        let wall = crate::builder::create_wall(2300.0, 2000.0, &mut bond).unwrap();
        let reach = Rectangle::new(Point::ORIGIN, 800.0, 1300.0);
        let mut strategy = MoveStrategy::outside_in(AlignmentStrategy::center());

        let first = strategy.next_move(reach, &wall).unwrap();
        let second = strategy.next_move(reach, &wall).unwrap();
        let third = strategy.next_move(reach, &wall).unwrap();

        assert_eq!(first.bottom_left(), Point::new(1500.0, 0.0));
        assert_eq!(second.bottom_left(), Point::new(0.0, 0.0));
        assert_eq!(third.bottom_left(), Point::new(1500.0, 0.0));
    }

    #[test]
    fn snake_only_toggles_when_course_index_advances() {
        let course0 = Course::new(0.0, vec![unit_at(0.0, 210.0)]);
        let course1 = Course::new(crate::units::COURSE_HEIGHT, vec![unit_at(0.0, 210.0)]);
        course0.units()[0].mark_built();
        let wall = Wall::new(Rectangle::new(Point::ORIGIN, 1000.0, 1000.0), vec![course0, course1]);
        let reach = Rectangle::new(Point::ORIGIN, 800.0, 1300.0);

        let mut strategy = MoveStrategy::snake(AlignmentStrategy::left());
        // course 0 already built: jumps straight to course 1
        let mv = strategy.next_move(reach, &wall);
        assert!(mv.is_some());
    }

    #[test]
    fn dynamic_snake_picks_side_with_more_remaining_work() {
        let units = vec![unit_at(0.0, 100.0), unit_at(200.0, 100.0), unit_at(400.0, 100.0)];
        units[0].mark_built();
        let course = Course::new(0.0, units);
        let wall = Wall::new(Rectangle::new(Point::ORIGIN, 1000.0, 1000.0), vec![course]);
        let reach = Rectangle::new(Point::ORIGIN, 50.0, 50.0);

        let mut strategy = MoveStrategy::dynamic_snake(AlignmentStrategy::center());
        let mv = strategy.next_move(reach, &wall);
        assert!(mv.is_some());
    }
}
