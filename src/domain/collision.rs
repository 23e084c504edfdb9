// Linear-scan collision index over every typed collection.

use super::entities::{EntityKind, Positioned};
use super::geometry::Rectangle;
use super::world::World;

/// Stable reference to an entity inside a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityHandle {
    Player,
    Tile(usize),
    Item(usize),
    Portal(usize),
    Spike(usize),
    InvWall(usize),
    Npc(usize),
    BossV1,
    BossV2,
    Bullet(usize),
}

impl EntityHandle {
    pub fn kind(self) -> EntityKind {
        match self {
            EntityHandle::Player => EntityKind::Player,
            EntityHandle::Tile(_) => EntityKind::Tile,
            EntityHandle::Item(_) => EntityKind::Item,
            EntityHandle::Portal(_) => EntityKind::Portal,
            EntityHandle::Spike(_) => EntityKind::Spike,
            EntityHandle::InvWall(_) => EntityKind::InvWall,
            EntityHandle::Npc(_) => EntityKind::Npc,
            EntityHandle::BossV1 => EntityKind::BossV1,
            EntityHandle::BossV2 => EntityKind::BossV2,
            EntityHandle::Bullet(_) => EntityKind::Bullet,
        }
    }
}

fn scan<T: Positioned>(
    entities: &[T],
    query: &Rectangle,
    handle: fn(usize) -> EntityHandle,
    out: &mut Vec<EntityHandle>,
) {
    out.extend(
        entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.rectangle().intersects(query))
            .map(|(i, _)| handle(i)),
    );
}

impl World {
    /// Every entity intersecting `query`, ordered by collection and then by
    /// insertion: player, tiles, items, portals, spikes, inv-walls, NPCs,
    /// boss v1, boss v2, bullets.
    pub fn collisions(&self, query: &Rectangle) -> Vec<EntityHandle> {
        let mut out = Vec::new();

        if self.player.rectangle().intersects(query) {
            out.push(EntityHandle::Player);
        }
        scan(&self.tiles, query, EntityHandle::Tile, &mut out);
        scan(&self.items, query, EntityHandle::Item, &mut out);
        scan(&self.portals, query, EntityHandle::Portal, &mut out);
        scan(&self.spikes, query, EntityHandle::Spike, &mut out);
        scan(&self.inv_walls, query, EntityHandle::InvWall, &mut out);
        scan(&self.npcs, query, EntityHandle::Npc, &mut out);
        if let Some(b) = &self.boss_v1 {
            if b.rectangle().intersects(query) {
                out.push(EntityHandle::BossV1);
            }
        }
        if let Some(b) = &self.boss_v2 {
            if b.rectangle().intersects(query) {
                out.push(EntityHandle::BossV2);
            }
        }
        scan(&self.bullets, query, EntityHandle::Bullet, &mut out);

        out
    }

    /// Current bounds of the entity behind `handle`.
    ///
    /// Handles come from [`World::collisions`] on the same world, so indices
    /// are in range; a boss handle without a boss yields an empty rectangle.
    pub fn rectangle_of(&self, handle: EntityHandle) -> Rectangle {
        let empty = || Rectangle::from_origin(Default::default(), 0.0, 0.0);
        match handle {
            EntityHandle::Player => self.player.rectangle(),
            EntityHandle::Tile(i) => self.tiles[i].rectangle(),
            EntityHandle::Item(i) => self.items[i].rectangle(),
            EntityHandle::Portal(i) => self.portals[i].rectangle(),
            EntityHandle::Spike(i) => self.spikes[i].rectangle(),
            EntityHandle::InvWall(i) => self.inv_walls[i].rectangle(),
            EntityHandle::Npc(i) => self.npcs[i].rectangle(),
            EntityHandle::BossV1 => self.boss_v1.as_ref().map_or_else(empty, |b| b.rectangle()),
            EntityHandle::BossV2 => self.boss_v2.as_ref().map_or_else(empty, |b| b.rectangle()),
            EntityHandle::Bullet(i) => self.bullets[i].rectangle(),
        }
    }

    /// First solid entity the query overlaps, in collision order.
    pub fn first_solid(&self, query: &Rectangle) -> Option<Rectangle> {
        self.collisions(query)
            .into_iter()
            .find(|h| h.kind().is_solid())
            .map(|h| self.rectangle_of(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::{fixture_world, point};

    #[test]
    fn collisions_follow_collection_order() {
        let world = fixture_world();
        // The fixture stacks one entity of each kind around (96, 256).
        let query = Rectangle::from_origin(point(0.0, 0.0), 10_000.0, 10_000.0);
        let kinds: Vec<EntityKind> = world
            .collisions(&query)
            .into_iter()
            .map(|h| h.kind())
            .collect();

        let mut order: Vec<EntityKind> = Vec::new();
        for k in kinds {
            if order.last() != Some(&k) {
                order.push(k);
            }
        }
        assert_eq!(
            order,
            vec![
                EntityKind::Player,
                EntityKind::Tile,
                EntityKind::Item,
                EntityKind::Portal,
                EntityKind::Spike,
                EntityKind::InvWall,
                EntityKind::Npc,
                EntityKind::BossV1,
                EntityKind::BossV2,
                EntityKind::Bullet,
            ]
        );
    }

    #[test]
    fn insertion_order_within_a_collection() {
        let world = fixture_world();
        let query = Rectangle::from_origin(point(0.0, 288.0), 10_000.0, 32.0);
        let tiles: Vec<EntityHandle> = world
            .collisions(&query)
            .into_iter()
            .filter(|h| h.kind() == EntityKind::Tile)
            .collect();
        assert!(tiles.len() > 1);
        assert!(tiles.windows(2).all(|w| match (w[0], w[1]) {
            (EntityHandle::Tile(a), EntityHandle::Tile(b)) => a < b,
            _ => false,
        }));
    }

    #[test]
    fn first_solid_skips_passable_entities() {
        let world = fixture_world();
        let in_spike = Rectangle::from_origin(point(130.0, 260.0), 10.0, 10.0);
        assert!(!world.collisions(&in_spike).is_empty());
        assert_eq!(world.first_solid(&in_spike), None);

        let in_wall = Rectangle::from_origin(point(1805.0, 195.0), 10.0, 10.0);
        assert_eq!(
            world.first_solid(&in_wall),
            Some(Rectangle::from_origin(point(1800.0, 192.0), 32.0, 32.0))
        );
    }

    #[test]
    fn nothing_far_away() {
        let world = fixture_world();
        let query = Rectangle::from_origin(point(-5000.0, -5000.0), 10.0, 10.0);
        assert!(world.collisions(&query).is_empty());
        assert_eq!(world.first_solid(&query), None);
    }
}
