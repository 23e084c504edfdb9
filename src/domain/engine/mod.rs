// Aggregate root of one level run: owns the world and drives ticks.

mod loader;
mod tick;

use super::dialog::{DialogProvider, DialogState};
use super::entities::Positioned;
use super::geometry::{Point, Rectangle};
use super::level::{LevelDescription, LevelError};
use super::world::World;
use serde::Serialize;

pub use tick::TickReport;

pub const CAMERA_WIDTH: f64 = 1280.0;
pub const CAMERA_HEIGHT: f64 = 720.0;

/// One inventory line as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    pub name: String,
    pub important: bool,
}

pub struct Engine {
    pub level_id: String,
    pub spawn: Point,
    pub world: World,
    pub tick: u64,
    pub paused: bool,
    pub win: bool,
    /// NPC whose dialog is on screen, if any.
    pub active_npc: Option<usize>,
    pub dialog_input: String,
    pub dialog_scroll: usize,
    pub camera: Rectangle,
}

impl Engine {
    pub fn new(level: &LevelDescription, dialogs: &dyn DialogProvider) -> Result<Self, LevelError> {
        let loaded = loader::load(level, dialogs)?;
        let mut engine = Self {
            level_id: level.id.clone(),
            spawn: loaded.spawn,
            world: loaded.world,
            tick: 0,
            paused: false,
            win: false,
            active_npc: None,
            dialog_input: String::new(),
            dialog_scroll: 0,
            camera: Rectangle::from_origin(Point::default(), CAMERA_WIDTH, CAMERA_HEIGHT),
        };
        engine.follow_player();
        Ok(engine)
    }

    pub fn player_dead(&self) -> bool {
        self.world.player.is_dead()
    }

    /// Collected items in pickup order.
    pub fn inventory(&self) -> Vec<InventoryEntry> {
        self.world
            .player
            .inventory
            .iter()
            .map(|&i| &self.world.items[i])
            .map(|it| InventoryEntry {
                name: it.name.clone(),
                important: it.important,
            })
            .collect()
    }

    pub fn dialog_state(&self) -> Option<&DialogState> {
        self.active_npc.map(|i| self.world.npcs[i].dialog.state())
    }

    /// Forces the open dialog's state; used by replicas following the host.
    pub fn apply_dialog_state(&mut self, state: DialogState) {
        if let Some(i) = self.active_npc {
            self.world.npcs[i].dialog.set_state(state);
        }
    }

    pub(crate) fn follow_player(&mut self) {
        let c = self.world.player.rectangle().center();
        self.camera = Rectangle::from_origin(
            Point::new(c.x - CAMERA_WIDTH / 2.0, c.y - CAMERA_HEIGHT / 2.0),
            CAMERA_WIDTH,
            CAMERA_HEIGHT,
        );
    }
}
