// Typed entity collections of one running level.

use super::boss::{BossV1, BossV2};
use super::entities::{Bullet, InvWall, Item, Npc, Portal, Spike, Tile};
use super::player::Player;

pub struct World {
    pub player: Player,
    pub tiles: Vec<Tile>,
    pub items: Vec<Item>,
    pub portals: Vec<Portal>,
    pub spikes: Vec<Spike>,
    pub inv_walls: Vec<InvWall>,
    pub npcs: Vec<Npc>,
    pub boss_v1: Option<BossV1>,
    pub boss_v2: Option<BossV2>,
    /// Only collection that grows and shrinks during play.
    pub bullets: Vec<Bullet>,
    /// Level extent in world units; bullets outside are culled.
    pub width: f64,
    pub height: f64,
}

impl World {
    pub fn item_index(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|it| it.name == name)
    }

    /// Important items the player has not picked up yet.
    pub fn missing_important(&self) -> usize {
        self.items
            .iter()
            .filter(|it| it.important && !it.collected)
            .count()
    }
}
