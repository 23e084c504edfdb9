// Boss encounters: shared lifecycle plus the two boss state machines.

pub mod v1;
pub mod v2;

pub use v1::BossV1;
pub use v2::BossV2;

use super::entities::Bullet;
use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// Level objects a boss hands out when it dies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossLink {
    /// Index of the win portal.
    pub portal: usize,
    /// Index of the reward item.
    pub item: usize,
    pub win_point: Point,
}

/// Encounter lifecycle flags, persisted with the boss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub entered: bool,
    pub dead: bool,
    /// Set once the portal and item were moved to the win point.
    pub reward_placed: bool,
}

impl Encounter {
    /// The boss acts only while entered and alive.
    pub fn is_active(&self) -> bool {
        self.entered && !self.dead
    }
}

/// What one boss tick produced.
#[derive(Debug, Default)]
pub struct BossStep {
    pub bullets: Vec<Bullet>,
    /// The boss died on this tick.
    pub died: bool,
}

impl BossStep {
    fn death() -> Self {
        Self {
            bullets: Vec::new(),
            died: true,
        }
    }
}
