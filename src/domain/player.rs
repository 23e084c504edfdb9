// The controllable character: movement intent, health and inventory.

use super::entities::{Body, EntityKind, Positioned};
use super::geometry::{Point, Vector};
use super::input::{Input, Key};
use super::physics::{GRAVITY_ACCELERATION, Physical};
use super::tuning::player::{DEFAULT_HEALTH, HEIGHT, JUMP_SPEED, RUN_SPEED, WIDTH};
use serde::{Deserialize, Serialize};

/// Cosmetic pose picked from motion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    Standing,
    Running,
    Jumping,
    Falling,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub physical: Physical,
    pub health: i64,
    /// Indices into the engine's item list, in pickup order.
    pub inventory: Vec<usize>,
    pub looks_right: bool,
    pub on_ground: bool,
}

impl Player {
    pub fn new(spawn: Point) -> Self {
        Self {
            body: Body::new(spawn, WIDTH, HEIGHT),
            physical: Physical::default(),
            health: DEFAULT_HEALTH,
            inventory: Vec::new(),
            looks_right: true,
            on_ground: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Health never drops below zero.
    pub fn take_damage(&mut self, amount: i64) {
        self.health = (self.health - amount).max(0);
    }

    pub fn kill(&mut self) {
        self.health = 0;
    }

    /// Back to spawn with full health and no motion. Inventory is kept.
    pub fn respawn(&mut self, spawn: Point) {
        self.body.move_to(spawn);
        self.physical = Physical::default();
        self.health = DEFAULT_HEALTH;
        self.on_ground = false;
    }

    /// Turns held keys into acceleration and speed for this tick.
    pub fn apply_input(&mut self, input: &Input) {
        self.physical.acceleration.y = if self.on_ground {
            0.0
        } else {
            GRAVITY_ACCELERATION
        };

        if self.on_ground && (input.is_down(Key::Space) || input.is_down(Key::W)) {
            self.physical.speed.y = JUMP_SPEED;
        }

        self.physical.speed.x = if input.is_down(Key::A) {
            -RUN_SPEED
        } else if input.is_down(Key::D) {
            RUN_SPEED
        } else {
            0.0
        };
        if self.physical.speed.x != 0.0 {
            self.looks_right = self.physical.speed.x > 0.0;
        }

        self.physical.apply_acceleration();
    }

    pub fn step_x(&mut self) {
        self.body.move_by(Vector::new(self.physical.speed.x, 0.0));
    }

    pub fn step_y(&mut self) {
        self.body.move_by(Vector::new(0.0, self.physical.speed.y));
        self.on_ground = false;
    }

    /// Applies the vertical push out of a solid block.
    pub fn land_or_bump(&mut self, push: Vector) {
        self.body.move_by(push);
        if push.y < 0.0 {
            self.on_ground = true;
        } else {
            self.physical.speed.y = 0.0;
        }
    }

    pub fn animation(&self) -> Animation {
        if !self.on_ground {
            if self.physical.speed.y <= 0.0 {
                Animation::Jumping
            } else {
                Animation::Falling
            }
        } else if self.physical.speed.x != 0.0 {
            Animation::Running
        } else {
            Animation::Standing
        }
    }
}

impl Positioned for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airborne_player_accelerates_down() {
        let mut p = Player::new(Point::new(0.0, 0.0));
        p.apply_input(&Input::default());
        assert_eq!(p.physical.speed.y, GRAVITY_ACCELERATION);
        assert_eq!(p.animation(), Animation::Falling);
    }

    #[test]
    fn jump_only_from_ground() {
        let mut p = Player::new(Point::new(0.0, 0.0));
        p.apply_input(&Input::holding(&[Key::Space]));
        assert!(p.physical.speed.y > 0.0);

        p.on_ground = true;
        p.physical.speed.y = 0.0;
        p.apply_input(&Input::holding(&[Key::W]));
        assert_eq!(p.physical.speed.y, JUMP_SPEED);
        p.step_y();
        assert_eq!(p.animation(), Animation::Jumping);
    }

    #[test]
    fn left_wins_over_right() {
        let mut p = Player::new(Point::new(0.0, 0.0));
        p.apply_input(&Input::holding(&[Key::D, Key::A]));
        assert_eq!(p.physical.speed.x, -RUN_SPEED);
        assert!(!p.looks_right);
    }

    #[test]
    fn health_is_clamped_at_zero() {
        let mut p = Player::new(Point::new(0.0, 0.0));
        p.take_damage(250);
        assert_eq!(p.health, 0);
        assert!(p.is_dead());
    }

    #[test]
    fn upward_push_grounds_the_player() {
        let mut p = Player::new(Point::new(0.0, 0.0));
        p.physical.speed.y = 3.0;
        p.land_or_bump(Vector::new(0.0, -1.0));
        assert!(p.on_ground);

        p.on_ground = false;
        p.physical.speed.y = -4.0;
        p.land_or_bump(Vector::new(0.0, 2.0));
        assert!(!p.on_ground);
        assert_eq!(p.physical.speed.y, 0.0);
    }
}
