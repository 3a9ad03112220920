//! Shooter simulation
//!
//! One `World` per run, advanced a tick at a time from `InputIntents`. Given
//! the same config, seed and intents it replays exactly: randomness comes from
//! the world's own PCG streams, and enemies and shots are kept in the order
//! their ids were handed out. Nothing in here draws or reads the keyboard.

pub mod autopilot;
pub mod config;
pub mod geometry;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use config::{
    BottomPolicy, ConfigError, PlayerConfig, ProjectileConfig, SpawnPolicy, WorldConfig,
};
pub use geometry::{Rect, intersects};
pub use snapshot::{EnemyView, Snapshot, StarView, TickResult};
pub use state::{Enemy, GameEvent, Player, Projectile, Rgb, Star, World};
pub use tick::InputIntents;
