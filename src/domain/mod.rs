// Domain layer: deterministic simulation types and rules.

pub mod boss;
pub mod collision;
pub mod dialog;
pub mod engine;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod level;
pub mod physics;
pub mod player;
pub mod ports;
pub mod snapshot;
pub mod tuning;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

pub use engine::{Engine, InventoryEntry, TickReport};
pub use input::{Input, Key};
pub use level::{LevelDescription, LevelError};
pub use snapshot::{ChecksumError, SnapshotError};
