// Forward-Euler motion state for anything that falls.

use super::geometry::Vector;
use serde::{Deserialize, Serialize};

/// Downward acceleration applied to airborne bodies, in px per tick squared.
pub const GRAVITY_ACCELERATION: f64 = 1.0 / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Physical {
    pub speed: Vector,
    pub acceleration: Vector,
}

impl Physical {
    /// One integration step: `speed += acceleration`.
    pub fn apply_acceleration(&mut self) {
        self.speed += self.acceleration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_accumulates_into_speed() {
        let mut body = Physical {
            speed: Vector::new(1.0, 0.0),
            acceleration: Vector::new(0.0, 0.5),
        };
        body.apply_acceleration();
        body.apply_acceleration();
        assert_eq!(body.speed, Vector::new(1.0, 1.0));
    }
}
