//! Space Shooter - A deterministic arcade shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world state)
//! - `platform`: Input adapter (key events to per-tick intents)
//! - `render`: Snapshot readers (character grid, terminal output)
//! - `clock`: Fixed timestep accumulator
//! - `session`: Driver loop contract (restart, fire, tick)
//! - `settings`: Driver preferences

pub mod clock;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, Variant};

/// Game configuration constants
pub mod consts {
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Score awarded per destroyed enemy
    pub const ENEMY_REWARD: u64 = 10;

    /// Arcade variant (random spawns, escaped enemies vanish)
    pub const ARCADE_FIELD_WIDTH: f32 = 800.0;
    pub const ARCADE_FIELD_HEIGHT: f32 = 600.0;
    pub const ARCADE_TICK_HZ: f32 = 60.0;
    pub const ARCADE_PLAYER_SIZE: f32 = 40.0;
    pub const ARCADE_PLAYER_SPEED: f32 = 6.0;
    pub const ARCADE_BULLET_WIDTH: f32 = 4.0;
    pub const ARCADE_BULLET_HEIGHT: f32 = 10.0;
    pub const ARCADE_BULLET_SPEED: f32 = 10.0;
    /// One spawn roll in this many ticks succeeds
    pub const ARCADE_SPAWN_ONE_IN: u32 = 40;
    pub const ARCADE_ENEMY_SPEED_MIN: f32 = 2.0;
    pub const ARCADE_ENEMY_SPEED_MAX: f32 = 4.0;
    pub const STAR_COUNT: usize = 80;

    /// Classic variant (fixed waves, an escaped enemy ends the run)
    pub const CLASSIC_FIELD_WIDTH: f32 = 500.0;
    pub const CLASSIC_FIELD_HEIGHT: f32 = 500.0;
    /// One tick every 15 ms
    pub const CLASSIC_TICK_HZ: f32 = 1000.0 / 15.0;
    pub const CLASSIC_PLAYER_WIDTH: f32 = 50.0;
    pub const CLASSIC_PLAYER_HEIGHT: f32 = 20.0;
    pub const CLASSIC_PLAYER_Y: f32 = 450.0;
    pub const CLASSIC_PLAYER_SPEED: f32 = 5.0;
    pub const CLASSIC_BULLET_WIDTH: f32 = 5.0;
    pub const CLASSIC_BULLET_HEIGHT: f32 = 10.0;
    pub const CLASSIC_BULLET_SPEED: f32 = 7.0;
    pub const CLASSIC_WAVE_SIZE: u32 = 5;
    pub const CLASSIC_WAVE_X: f32 = 50.0;
    pub const CLASSIC_WAVE_SPACING: f32 = 80.0;
    pub const CLASSIC_WAVE_Y: f32 = 30.0;
    pub const CLASSIC_WAVE_SPEED: f32 = 2.0;
    pub const CLASSIC_WAVE_SPEED_STEP: f32 = 1.0;

    /// Enemies are square in both variants
    pub const ENEMY_SIZE: f32 = 40.0;
}
