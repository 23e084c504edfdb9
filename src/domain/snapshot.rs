// Canonical persisted form of an engine plus its SHA-256 checksum.

use super::boss::v1::BossV1State;
use super::boss::v2::BossV2State;
use super::dialog::DialogProvider;
use super::engine::Engine;
use super::entities::Bullet;
use super::geometry::{Point, Vector};
use super::level::{LevelDescription, LevelError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub origin: Point,
    pub speed: Vector,
    pub acceleration: Vector,
    pub health: i64,
    pub on_ground: bool,
    pub looks_right: bool,
    /// Item names in pickup order.
    pub inventory: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub name: String,
    pub origin: Point,
    pub collected: bool,
}

/// Everything needed to rebuild an engine on top of a freshly loaded level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level_id: String,
    pub tick: u64,
    pub paused: bool,
    pub win: bool,
    pub player: PlayerSnapshot,
    pub items: Vec<ItemSnapshot>,
    pub portals: Vec<Point>,
    pub npc_rewards: Vec<bool>,
    pub boss_v1: Option<BossV1State>,
    pub boss_v2: Option<BossV2State>,
    pub bullets: Vec<Bullet>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid level: {0}")]
    Level(#[from] LevelError),
    #[error("malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("snapshot is for level {found:?}, expected {expected:?}")]
    LevelMismatch { expected: String, found: String },
    #[error("snapshot references unknown item {0:?}")]
    UnknownItem(String),
    #[error("snapshot has {found} {what}, level has {expected}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("checksum mismatch: expected {expected}, got {claimed}")]
    Mismatch { expected: String, claimed: String },
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Lowercase hex SHA-256.
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn expect_count(what: &'static str, expected: usize, found: usize) -> Result<(), SnapshotError> {
    if expected == found {
        Ok(())
    } else {
        Err(SnapshotError::CountMismatch {
            what,
            expected,
            found,
        })
    }
}

impl Engine {
    pub fn to_snapshot(&self) -> Snapshot {
        let w = &self.world;
        let p = &w.player;
        Snapshot {
            level_id: self.level_id.clone(),
            tick: self.tick,
            paused: self.paused,
            win: self.win,
            player: PlayerSnapshot {
                origin: p.body.origin,
                speed: p.physical.speed,
                acceleration: p.physical.acceleration,
                health: p.health,
                on_ground: p.on_ground,
                looks_right: p.looks_right,
                inventory: p.inventory.iter().map(|&i| w.items[i].name.clone()).collect(),
            },
            items: w
                .items
                .iter()
                .map(|it| ItemSnapshot {
                    name: it.name.clone(),
                    origin: it.body.origin,
                    collected: it.collected,
                })
                .collect(),
            portals: w.portals.iter().map(|p| p.body.origin).collect(),
            npc_rewards: w.npcs.iter().map(|n| n.reward_given).collect(),
            boss_v1: w.boss_v1.as_ref().map(|b| b.state.clone()),
            boss_v2: w.boss_v2.as_ref().map(|b| b.state.clone()),
            bullets: w.bullets.clone(),
        }
    }

    /// Serialized persisted state; identical engines produce identical bytes.
    pub fn snapshot(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_snapshot())
    }

    pub fn checksum(&self) -> Result<String, serde_json::Error> {
        Ok(digest(&self.snapshot()?))
    }

    pub fn validate_checksum(&self, claimed: &str) -> Result<(), ChecksumError> {
        let expected = self.checksum()?;
        if expected == claimed {
            Ok(())
        } else {
            Err(ChecksumError::Mismatch {
                expected,
                claimed: claimed.to_string(),
            })
        }
    }

    /// Loads the level fresh and overlays persisted state from `bytes`.
    pub fn from_snapshot(
        level: &LevelDescription,
        dialogs: &dyn DialogProvider,
        bytes: &[u8],
    ) -> Result<Self, SnapshotError> {
        let snap: Snapshot = serde_json::from_slice(bytes)?;
        let mut engine = Engine::new(level, dialogs)?;
        engine.restore(snap)?;
        Ok(engine)
    }

    fn restore(&mut self, snap: Snapshot) -> Result<(), SnapshotError> {
        if snap.level_id != self.level_id {
            return Err(SnapshotError::LevelMismatch {
                expected: self.level_id.clone(),
                found: snap.level_id,
            });
        }

        let w = &mut self.world;
        expect_count("items", w.items.len(), snap.items.len())?;
        expect_count("portals", w.portals.len(), snap.portals.len())?;
        expect_count("npcs", w.npcs.len(), snap.npc_rewards.len())?;
        expect_count(
            "boss-v1",
            usize::from(w.boss_v1.is_some()),
            usize::from(snap.boss_v1.is_some()),
        )?;
        expect_count(
            "boss-v2",
            usize::from(w.boss_v2.is_some()),
            usize::from(snap.boss_v2.is_some()),
        )?;

        for (item, saved) in w.items.iter_mut().zip(&snap.items) {
            if item.name != saved.name {
                return Err(SnapshotError::UnknownItem(saved.name.clone()));
            }
            item.body.move_to(saved.origin);
            item.collected = saved.collected;
        }

        let mut inventory = Vec::with_capacity(snap.player.inventory.len());
        for name in &snap.player.inventory {
            let i = w
                .item_index(name)
                .ok_or_else(|| SnapshotError::UnknownItem(name.clone()))?;
            w.items[i].collected = true;
            inventory.push(i);
        }

        let p = &mut w.player;
        p.body.move_to(snap.player.origin);
        p.physical.speed = snap.player.speed;
        p.physical.acceleration = snap.player.acceleration;
        p.health = snap.player.health;
        p.on_ground = snap.player.on_ground;
        p.looks_right = snap.player.looks_right;
        p.inventory = inventory;

        for (portal, origin) in w.portals.iter_mut().zip(snap.portals) {
            portal.body.move_to(origin);
        }
        for (npc, given) in w.npcs.iter_mut().zip(snap.npc_rewards) {
            npc.reward_given = given;
        }
        if let (Some(b), Some(state)) = (w.boss_v1.as_mut(), snap.boss_v1) {
            b.state = state;
        }
        if let (Some(b), Some(state)) = (w.boss_v2.as_mut(), snap.boss_v2) {
            b.state = state;
        }
        w.bullets = snap.bullets;

        self.tick = snap.tick;
        self.paused = snap.paused;
        self.win = snap.win;
        self.follow_player();
        Ok(())
    }
}
