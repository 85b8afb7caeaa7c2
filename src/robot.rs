//! The robot: a bounded reach rectangle that lays reachable, supported
//! bricks and repositions itself via a move strategy when it runs out of
//! reachable work.

use crate::geometry::{Point, Rectangle};
use crate::strategy::MoveStrategy;
use crate::units::{Brick, Wall, BED_JOINT_THICKNESS};

// ====================
// PUBLIC STRUCTS
// ====================

/// A stationary bricklaying robot with a fixed-size reach rectangle.
pub struct Robot {
    reach: Rectangle,
    move_strategy: MoveStrategy,
    move_count: u32,
}

impl Robot {
    /// Constructs a robot with reach at the wall's origin.
    pub fn new(reach_length: f64, reach_height: f64, move_strategy: MoveStrategy) -> Self {
        Robot {
            reach: Rectangle::new(Point::ORIGIN, reach_length, reach_height),
            move_strategy,
            move_count: 0,
        }
    }

    pub fn reach(&self) -> Rectangle {
        self.reach
    }

    /// The number of successful repositions so far; the stride label of the
    /// most recently laid brick is `move_count() + 1`.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Scans courses bottom-to-top for unbuilt, reachable, supported units,
    /// marking each one built as it goes. Head joints are built and skipped
    /// silently; the scan only stops and returns once it reaches a brick.
    pub fn lay_brick(&mut self, wall: &Wall) -> Option<Brick> {
        let courses = wall.courses();
        for index in 0..courses.len() {
            let course_below = if index == 0 { None } else { Some(&courses[index - 1]) };
            for unit in courses[index].units() {
                if unit.is_built() {
                    continue;
                }
                if !self.can_reach(unit.rect()) {
                    continue;
                }
                if !unit.is_supported(course_below) {
                    continue;
                }
                unit.mark_built();
                if let Some(brick) = unit.as_brick() {
                    return Some(brick);
                }
            }
        }
        None
    }

    /// Delegates to the move strategy; on success replaces `reach` and
    /// increments the stride counter.
    pub fn reposition(&mut self, wall: &Wall) -> bool {
        match self.move_strategy.next_move(self.reach, wall) {
            Some(next_reach) => {
                self.reach = next_reach;
                self.move_count += 1;
                true
            }
            None => false,
        }
    }

    fn can_reach(&self, unit_rect: Rectangle) -> bool {
        let bed_joint_rect = Rectangle::new(
            unit_rect.bottom_left().plus_y(-BED_JOINT_THICKNESS),
            unit_rect.length(),
            BED_JOINT_THICKNESS,
        );
        self.reach.bounds(&bed_joint_rect) && self.reach.bounds(&unit_rect)
    }
}

/// Repeatedly lays bricks and repositions the robot until neither makes
/// progress, returning the total number of strides (`move_count + 1`).
pub fn drive_to_completion(robot: &mut Robot, wall: &Wall) -> u32 {
    loop {
        if robot.lay_brick(wall).is_none() && !robot.reposition(wall) {
            break;
        }
    }
    robot.move_count() + 1
}

// ====================
// TESTS
// ====================
