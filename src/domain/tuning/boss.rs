/// Gameplay tuning for both boss encounters.

pub const BOSS_WIDTH: f64 = 128.0;
pub const BOSS_HEIGHT: f64 = 128.0;

/// Firing angle advance per V1 tick, in radians.
pub const V1_ROTATE_STEP: f64 = 3.1415 / 60.0;
/// V1 fires a ring once every this many ticks.
pub const V1_FIRE_PERIOD: u32 = 8;
pub const V1_BULLET_MULTIPLIERS: [f64; 3] = [2.0, 4.0, 8.0];

/// V2 fires an aimed volley once every this many ticks.
pub const V2_FIRE_PERIOD: u64 = 3;
pub const V2_BULLET_DIVISORS: [f64; 6] = [30.0, 55.0, 60.0, 80.0, 100.0, 110.0];

pub const CROSS_SIZE: f64 = 128.0;
/// Ticks each cross takes to reach the point it aimed at.
pub const CROSS_BUDGETS: [u32; 4] = [150, 170, 190, 210];

pub const BARBELL_SIZE: f64 = 128.0;
/// Delay before each barbell starts hunting.
pub const BARBELL_START_DELAYS: [u32; 2] = [150, 200];
/// Height above the player a hunting barbell tries to hover at.
pub const BARBELL_HOVER_HEIGHT: f64 = 520.0;
/// How far below the player's top a dropping barbell aims.
pub const BARBELL_DROP_DEPTH: f64 = 320.0;
pub const BARBELL_FALL_TICKS: u32 = 180;

/// Horizontal gap between the win portal and the reward item placed after a kill.
pub const REWARD_GAP: f64 = 16.0;
