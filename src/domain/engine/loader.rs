// Turns a level description into typed collections, resolving every name.

use crate::domain::boss::{BossLink, BossV1, BossV2};
use crate::domain::dialog::DialogProvider;
use crate::domain::entities::{Body, BossSlot, InvWall, Item, Npc, Portal, Spike, Tile};
use crate::domain::geometry::Point;
use crate::domain::level::{LevelDescription, LevelError, LevelObject};
use crate::domain::player::Player;
use crate::domain::tuning::hazards::DEFAULT_SPIKE_DAMAGE;
use crate::domain::world::World;
use std::collections::HashSet;

const MARKERS: [&str; 3] = ["player-spawn", "boss-win", "teleport"];

pub(crate) struct Loaded {
    pub world: World,
    pub spawn: Point,
}

fn body_of(o: &LevelObject) -> Body {
    Body::new(o.origin(), o.width, o.height)
}

fn dangling(o: &LevelObject, what: &'static str, target: &str) -> LevelError {
    LevelError::DanglingReference {
        object: o.name.clone(),
        what,
        target: target.to_string(),
    }
}

fn point_of(
    level: &LevelDescription,
    o: &LevelObject,
    key: &'static str,
) -> Result<Point, LevelError> {
    let target = o.prop(key)?;
    level
        .object_named(target)
        .map(LevelObject::origin)
        .ok_or_else(|| dangling(o, "object", target))
}

fn item_of(items: &[Item], o: &LevelObject) -> Result<usize, LevelError> {
    let name = o.prop("item")?;
    items
        .iter()
        .position(|it| it.name == name)
        .ok_or_else(|| dangling(o, "item", name))
}

fn portal_of(portal_names: &[&str], o: &LevelObject) -> Result<usize, LevelError> {
    let name = o.prop("portal")?;
    portal_names
        .iter()
        .position(|p| *p == name)
        .ok_or_else(|| dangling(o, "portal", name))
}

fn link_of(
    level: &LevelDescription,
    items: &[Item],
    portal_names: &[&str],
    o: &LevelObject,
) -> Result<BossLink, LevelError> {
    Ok(BossLink {
        portal: portal_of(portal_names, o)?,
        item: item_of(items, o)?,
        win_point: point_of(level, o, "win-point")?,
    })
}

fn items(level: &LevelDescription) -> Result<Vec<Item>, LevelError> {
    let mut seen = HashSet::new();
    level
        .objects_of("item")
        .map(|o| {
            if !seen.insert(o.name.as_str()) {
                return Err(LevelError::DuplicateItem(o.name.clone()));
            }
            Ok(Item {
                body: body_of(o),
                name: o.name.clone(),
                important: o.prop_bool_or("important", false)?,
                collected: false,
            })
        })
        .collect()
}

fn portals(level: &LevelDescription) -> Result<Vec<Portal>, LevelError> {
    level
        .objects_of("portal")
        .map(|o| {
            let portal_to = o.prop("portal-to")?;
            let teleport_to = level
                .object_named(portal_to)
                .map(LevelObject::origin)
                .ok_or_else(|| dangling(o, "destination", portal_to))?;
            let boss = match o.properties.get("boss") {
                None => None,
                Some(name) => match level.object_named(name).map(|b| b.kind.as_str()) {
                    Some("boss-v1") => Some(BossSlot::V1),
                    Some("boss-v2") => Some(BossSlot::V2),
                    _ => return Err(dangling(o, "boss", name)),
                },
            };
            Ok(Portal {
                body: body_of(o),
                portal_to: portal_to.to_string(),
                teleport_to,
                boss,
            })
        })
        .collect()
}

pub(crate) fn load(
    level: &LevelDescription,
    dialogs: &dyn DialogProvider,
) -> Result<Loaded, LevelError> {
    let spawn = level
        .objects_of("player-spawn")
        .next()
        .map(LevelObject::origin)
        .ok_or(LevelError::NoPlayerSpawn)?;

    let tiles = level
        .solid_cells()
        .map(|origin| Tile {
            body: Body::new(origin, level.tile_width, level.tile_height),
        })
        .collect();
    let items = items(level)?;
    let portals = portals(level)?;
    let portal_names: Vec<&str> = level.objects_of("portal").map(|o| o.name.as_str()).collect();

    let mut spikes = Vec::new();
    let mut inv_walls = Vec::new();
    let mut npcs = Vec::new();
    let mut boss_v1 = None;
    let mut boss_v2 = None;

    for o in &level.objects {
        match o.kind.as_str() {
            "item" | "portal" => {}
            kind if MARKERS.contains(&kind) => {}
            "spike" => spikes.push(Spike {
                body: body_of(o),
                damage: o.prop_i64_or("damage", DEFAULT_SPIKE_DAMAGE)?,
            }),
            "invwall" => inv_walls.push(InvWall { body: body_of(o) }),
            "npc" => {
                let id = o.prop("dialog")?;
                let dialog = dialogs.get(id).ok_or_else(|| LevelError::UnknownDialog {
                    object: o.name.clone(),
                    dialog: id.to_string(),
                })?;
                npcs.push(Npc {
                    body: body_of(o),
                    dialog,
                    reward_item: item_of(&items, o)?,
                    reward_given: false,
                });
            }
            "boss-v1" => {
                if boss_v1.is_some() {
                    return Err(LevelError::DuplicateBoss("boss-v1"));
                }
                boss_v1 = Some(BossV1::new(
                    o.name.clone(),
                    o.origin(),
                    o.prop_f64("speed")?,
                    o.prop_f64("length")?,
                    o.prop_i64("health")?,
                    link_of(level, &items, &portal_names, o)?,
                ));
            }
            "boss-v2" => {
                if boss_v2.is_some() {
                    return Err(LevelError::DuplicateBoss("boss-v2"));
                }
                boss_v2 = Some(BossV2::new(
                    o.name.clone(),
                    o.origin(),
                    o.prop_f64("speed")?,
                    (o.prop_f64("width")?, o.prop_f64("height")?),
                    o.prop_i64("health")?,
                    link_of(level, &items, &portal_names, o)?,
                ));
            }
            other => {
                return Err(LevelError::UnknownObjectType {
                    object: o.name.clone(),
                    kind: other.to_string(),
                });
            }
        }
    }

    let (width, height) = level.bounds();
    Ok(Loaded {
        world: World {
            player: Player::new(spawn),
            tiles,
            items,
            portals,
            spikes,
            inv_walls,
            npcs,
            boss_v1,
            boss_v2,
            bullets: Vec::new(),
            width,
            height,
        },
        spawn,
    })
}
