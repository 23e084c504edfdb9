// Typed entities placed in a level.

use super::dialog::Dialog;
use super::geometry::{Point, Rectangle, Vector};
use super::tuning::hazards::BULLET_SIZE;
use serde::{Deserialize, Serialize};

/// Position and size shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Body {
    pub const fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn rectangle(&self) -> Rectangle {
        Rectangle::from_origin(self.origin, self.width, self.height)
    }

    pub fn move_by(&mut self, d: Vector) {
        self.origin += d;
    }

    pub fn move_to(&mut self, p: Point) {
        self.origin = p;
    }
}

/// Closed set of entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Tile,
    Player,
    Item,
    Portal,
    Spike,
    InvWall,
    Npc,
    Bullet,
    BossV1,
    BossV2,
}

impl EntityKind {
    /// Kinds the player cannot pass through.
    pub fn is_solid(self) -> bool {
        matches!(self, EntityKind::Tile | EntityKind::InvWall)
    }
}

/// Positioned, typed capability every entity exposes.
pub trait Positioned {
    fn body(&self) -> &Body;
    fn kind(&self) -> EntityKind;

    fn rectangle(&self) -> Rectangle {
        self.body().rectangle()
    }
}

macro_rules! positioned {
    ($ty:ty, $kind:expr) => {
        impl Positioned for $ty {
            fn body(&self) -> &Body {
                &self.body
            }

            fn kind(&self) -> EntityKind {
                $kind
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub body: Body,
}

#[derive(Debug, Clone)]
pub struct Item {
    pub body: Body,
    /// Unique key within a level.
    pub name: String,
    /// Required for the win condition.
    pub important: bool,
    pub collected: bool,
}

/// Boss slot a portal opens the encounter for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossSlot {
    V1,
    V2,
}

#[derive(Debug, Clone)]
pub struct Portal {
    pub body: Body,
    pub portal_to: String,
    pub teleport_to: Point,
    pub boss: Option<BossSlot>,
}

#[derive(Debug, Clone)]
pub struct Spike {
    pub body: Body,
    /// Subtracted on every tick of contact.
    pub damage: i64,
}

#[derive(Debug, Clone)]
pub struct InvWall {
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub damage: i64,
    pub direction: Vector,
    /// Set on first contact so the damage lands only once.
    pub triggered: bool,
}

impl Bullet {
    pub fn new(center: Point, damage: i64, direction: Vector) -> Self {
        let origin = Point::new(center.x - BULLET_SIZE / 2.0, center.y - BULLET_SIZE / 2.0);
        Self {
            body: Body::new(origin, BULLET_SIZE, BULLET_SIZE),
            damage,
            direction,
            triggered: false,
        }
    }

    pub fn advance(&mut self) {
        self.body.move_by(self.direction);
    }
}

pub struct Npc {
    pub body: Body,
    pub dialog: Box<dyn Dialog>,
    /// Index of the reward item in the engine's item list.
    pub reward_item: usize,
    pub reward_given: bool,
}

positioned!(Tile, EntityKind::Tile);
positioned!(Item, EntityKind::Item);
positioned!(Portal, EntityKind::Portal);
positioned!(Spike, EntityKind::Spike);
positioned!(InvWall, EntityKind::InvWall);
positioned!(Bullet, EntityKind::Bullet);
positioned!(Npc, EntityKind::Npc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_is_centred_on_spawn_point() {
        let b = Bullet::new(Point::new(100.0, 100.0), 6, Vector::new(1.0, 0.0));
        assert_eq!(b.rectangle().center(), Point::new(100.0, 100.0));
        assert_eq!(b.kind(), EntityKind::Bullet);
    }

    #[test]
    fn only_tiles_and_walls_are_solid() {
        assert!(EntityKind::Tile.is_solid());
        assert!(EntityKind::InvWall.is_solid());
        assert!(!EntityKind::Spike.is_solid());
        assert!(!EntityKind::Portal.is_solid());
    }
}
