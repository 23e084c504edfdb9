// Gameplay tuning, kept apart from runtime/server configuration.

pub mod boss;
pub mod hazards;
pub mod player;
