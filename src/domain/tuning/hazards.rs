/// Gameplay tuning for passive hazards and projectiles.

/// Spike damage when the level does not set a `damage` property.
pub const DEFAULT_SPIKE_DAMAGE: i64 = 100;

/// Side length of a bullet's square hitbox.
pub const BULLET_SIZE: f64 = 8.0;

/// Damage dealt by every boss bullet.
pub const BULLET_DAMAGE: i64 = 6;
