/// Gameplay tuning for the player character.

pub const WIDTH: f64 = 32.0;
pub const HEIGHT: f64 = 32.0;

/// Health a fresh (or restarted) player starts with.
pub const DEFAULT_HEALTH: i64 = 100;

/// Vertical speed applied on jump (negative is up).
pub const JUMP_SPEED: f64 = -5.0;

/// Horizontal speed while a direction key is held.
pub const RUN_SPEED: f64 = 2.5;

/// Reach around the player within which an NPC can be talked to.
pub const INTERACT_RANGE: f64 = 16.0;
