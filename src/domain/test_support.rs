// Level fixtures shared by domain unit tests.

use super::dialog::StandardProvider;
use super::engine::Engine;
use super::entities::Bullet;
use super::geometry::{Point, Vector};
use super::level::{LevelDescription, LevelObject};
use super::world::World;

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

pub fn object(name: &str, kind: &str, x: f64, y: f64, props: &[(&str, &str)]) -> LevelObject {
    LevelObject {
        name: name.to_string(),
        kind: kind.to_string(),
        x,
        y,
        width: 32.0,
        height: 32.0,
        properties: props
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// 60x10 cells of 32 px with a solid floor on the last row (top at y = 288).
pub fn level_with(objects: Vec<LevelObject>) -> LevelDescription {
    let mut tiles = vec![".".repeat(60); 9];
    tiles.push("#".repeat(60));
    LevelDescription {
        id: "test".to_string(),
        tile_width: 32.0,
        tile_height: 32.0,
        width: None,
        height: None,
        tiles,
        objects,
    }
}

/// Spawn, a damage-2 spike and one important item, all on the floor.
pub fn scenario_level() -> LevelDescription {
    level_with(vec![
        object("spawn", "player-spawn", 64.0, 256.0, &[]),
        object("spike", "spike", 128.0, 256.0, &[("damage", "2")]),
        object("gem", "item", 192.0, 256.0, &[("important", "true")]),
    ])
}

/// One or more objects of every kind.
pub fn fixture_level() -> LevelDescription {
    level_with(vec![
        object("spawn", "player-spawn", 64.0, 256.0, &[]),
        object("spike", "spike", 128.0, 256.0, &[("damage", "2")]),
        object("gem", "item", 192.0, 256.0, &[("important", "true")]),
        object("gift", "item", -1000.0, -1000.0, &[]),
        object("v1-prize", "item", -1000.0, -1100.0, &[]),
        object("v2-prize", "item", -1000.0, -1200.0, &[]),
        object("door", "portal", 320.0, 256.0, &[("portal-to", "dest")]),
        object(
            "v1-gate",
            "portal",
            900.0,
            256.0,
            &[("portal-to", "arena1"), ("boss", "turret")],
        ),
        object("v1-exit", "portal", -500.0, -500.0, &[("portal-to", "dest")]),
        object(
            "v2-gate",
            "portal",
            1500.0,
            256.0,
            &[("portal-to", "arena2"), ("boss", "tower")],
        ),
        object("v2-exit", "portal", -700.0, -700.0, &[("portal-to", "dest")]),
        object("dest", "teleport", 600.0, 256.0, &[]),
        object("arena1", "teleport", 1100.0, 256.0, &[]),
        object("arena2", "teleport", 1400.0, 256.0, &[]),
        object("slonik", "npc", 400.0, 256.0, &[("dialog", "slonik"), ("item", "gift")]),
        object("wall", "invwall", 1800.0, 192.0, &[]),
        object(
            "turret",
            "boss-v1",
            1200.0,
            100.0,
            &[
                ("speed", "2"),
                ("length", "100"),
                ("health", "300"),
                ("portal", "v1-exit"),
                ("item", "v1-prize"),
                ("win-point", "v1-win"),
            ],
        ),
        object("v1-win", "boss-win", 1300.0, 256.0, &[]),
        object(
            "tower",
            "boss-v2",
            1600.0,
            40.0,
            &[
                ("speed", "4"),
                ("width", "200"),
                ("height", "100"),
                ("health", "400"),
                ("portal", "v2-exit"),
                ("item", "v2-prize"),
                ("win-point", "v2-win"),
            ],
        ),
        object("v2-win", "boss-win", 1700.0, 256.0, &[]),
    ])
}

pub fn scenario_engine() -> Engine {
    Engine::new(&scenario_level(), &StandardProvider::new()).expect("scenario level loads")
}

pub fn fixture_engine() -> Engine {
    Engine::new(&fixture_level(), &StandardProvider::new()).expect("fixture level loads")
}

/// The fixture world with one bullet in flight.
pub fn fixture_world() -> World {
    let mut world = fixture_engine().world;
    world
        .bullets
        .push(Bullet::new(point(50.0, 50.0), 6, Vector::new(1.0, 0.0)));
    world
}
