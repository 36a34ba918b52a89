//! Tracked panel position estimate.
//!
//! The angle advances by exactly one degree per applied command and
//! saturates at the mechanical limits.  The commanded duty cycle sets how
//! hard the motor is driven; the tracked estimate still moves 1°/tick.
//! That decoupling is deliberate — see DESIGN.md.

use super::decision::Direction;

/// Lowest reachable panel angle (degrees).
pub const ANGLE_MIN: u8 = 0;
/// Highest reachable panel angle (degrees).
pub const ANGLE_MAX: u8 = 180;

/// Current panel angle estimate.  Owned exclusively by the control loop
/// and mutated once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerState {
    angle: u8,
}

impl TrackerState {
    /// Create a state at the given angle, clamped to the travel range.
    pub fn new(initial_deg: u8) -> Self {
        Self {
            angle: initial_deg.min(ANGLE_MAX),
        }
    }

    /// Current angle in degrees.
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Advance the estimate one degree in the applied direction,
    /// saturating at the travel limits.  Left increments, Right
    /// decrements, Hold leaves the angle unchanged.
    pub fn advance(&mut self, direction: Direction) {
        self.angle = match direction {
            Direction::Hold => self.angle,
            Direction::Left => (self.angle + 1).min(ANGLE_MAX),
            Direction::Right => self.angle.saturating_sub(1),
        };
    }
}
