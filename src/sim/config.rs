//! World tuning and the two cabinet presets
//!
//! A `WorldConfig` is validated once when a `World` is built; the simulation
//! never re-checks it.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How new enemies enter the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// A full row spawns whenever the field is clear; each later wave is faster
    Wave {
        count: u32,
        /// Left edge of the first enemy in the row
        x: f32,
        /// Horizontal distance between enemy left edges
        spacing: f32,
        y: f32,
        /// Speed of the first wave
        speed: f32,
        /// Added to the wave speed for every wave after the first
        speed_step: f32,
    },
    /// Each tick spawns one enemy with probability `1 / one_in`
    Random {
        one_in: u32,
        spawn_y: f32,
        /// Speeds are whole numbers drawn from `ceil(speed_min)..=floor(speed_max)`
        speed_min: f32,
        speed_max: f32,
    },
}

/// What happens when an enemy passes the escape line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomPolicy {
    /// The enemy silently leaves play
    #[default]
    Remove,
    /// The run ends
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Top-left corner at spawn and after reset
    pub start: Vec2,
    pub size: Vec2,
    /// Horizontal units per tick
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub size: Vec2,
    /// Upward units per tick
    pub speed: f32,
    /// Gap between a new shot's top edge and the ship's top edge
    #[serde(default)]
    pub muzzle_lift: f32,
}

/// Complete tuning for one world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub field_width: f32,
    pub field_height: f32,
    /// Target cadence for drivers (the simulation itself is tick-based)
    pub tick_hz: f32,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    /// Enemies are square
    pub enemy_size: f32,
    pub spawn: SpawnPolicy,
    pub bottom: BottomPolicy,
    /// An enemy whose top edge is below this line has left the field
    pub escape_y: f32,
    pub star_count: usize,
    pub reward: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::arcade()
    }
}

impl WorldConfig {
    /// 800x600 field, random trickle of enemies, escaped enemies vanish
    pub fn arcade() -> Self {
        Self {
            field_width: ARCADE_FIELD_WIDTH,
            field_height: ARCADE_FIELD_HEIGHT,
            tick_hz: ARCADE_TICK_HZ,
            player: PlayerConfig {
                start: Vec2::new(
                    ARCADE_FIELD_WIDTH / 2.0 - ARCADE_PLAYER_SIZE / 2.0,
                    ARCADE_FIELD_HEIGHT - 100.0,
                ),
                size: Vec2::splat(ARCADE_PLAYER_SIZE),
                speed: ARCADE_PLAYER_SPEED,
            },
            projectile: ProjectileConfig {
                size: Vec2::new(ARCADE_BULLET_WIDTH, ARCADE_BULLET_HEIGHT),
                speed: ARCADE_BULLET_SPEED,
                // Shots start just clear of the nose
                muzzle_lift: ARCADE_BULLET_HEIGHT,
            },
            enemy_size: ENEMY_SIZE,
            spawn: SpawnPolicy::Random {
                one_in: ARCADE_SPAWN_ONE_IN,
                spawn_y: -ENEMY_SIZE,
                speed_min: ARCADE_ENEMY_SPEED_MIN,
                speed_max: ARCADE_ENEMY_SPEED_MAX,
            },
            bottom: BottomPolicy::Remove,
            escape_y: ARCADE_FIELD_HEIGHT,
            star_count: STAR_COUNT,
            reward: ENEMY_REWARD,
        }
    }

    /// 500x500 field, rows of five that speed up, an escaped enemy ends the run
    pub fn classic() -> Self {
        Self {
            field_width: CLASSIC_FIELD_WIDTH,
            field_height: CLASSIC_FIELD_HEIGHT,
            tick_hz: CLASSIC_TICK_HZ,
            player: PlayerConfig {
                start: Vec2::new(
                    CLASSIC_FIELD_WIDTH / 2.0 - CLASSIC_PLAYER_WIDTH / 2.0,
                    CLASSIC_PLAYER_Y,
                ),
                size: Vec2::new(CLASSIC_PLAYER_WIDTH, CLASSIC_PLAYER_HEIGHT),
                speed: CLASSIC_PLAYER_SPEED,
            },
            projectile: ProjectileConfig {
                size: Vec2::new(CLASSIC_BULLET_WIDTH, CLASSIC_BULLET_HEIGHT),
                speed: CLASSIC_BULLET_SPEED,
                // Shots start level with the ship's top edge
                muzzle_lift: 0.0,
            },
            enemy_size: ENEMY_SIZE,
            spawn: SpawnPolicy::Wave {
                count: CLASSIC_WAVE_SIZE,
                x: CLASSIC_WAVE_X,
                spacing: CLASSIC_WAVE_SPACING,
                y: CLASSIC_WAVE_Y,
                speed: CLASSIC_WAVE_SPEED,
                speed_step: CLASSIC_WAVE_SPEED_STEP,
            },
            bottom: BottomPolicy::GameOver,
            // Bottom edge of the ship
            escape_y: CLASSIC_PLAYER_Y + CLASSIC_PLAYER_HEIGHT,
            star_count: 0,
            reward: ENEMY_REWARD,
        }
    }

    /// Largest x the player's left edge may take
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player.size.x
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("tick_hz", self.tick_hz)?;
        positive("player.size.x", self.player.size.x)?;
        positive("player.size.y", self.player.size.y)?;
        non_negative("player.speed", self.player.speed)?;
        positive("projectile.size.x", self.projectile.size.x)?;
        positive("projectile.size.y", self.projectile.size.y)?;
        positive("projectile.speed", self.projectile.speed)?;
        non_negative("projectile.muzzle_lift", self.projectile.muzzle_lift)?;
        positive("enemy_size", self.enemy_size)?;
        finite("escape_y", self.escape_y)?;

        if self.player.size.x > self.field_width {
            return Err(ConfigError::OutsideField("player.size.x"));
        }
        finite("player.start.x", self.player.start.x)?;
        finite("player.start.y", self.player.start.y)?;
        if self.player.start.x < 0.0 || self.player.start.x > self.player_max_x() {
            return Err(ConfigError::OutsideField("player.start.x"));
        }
        if self.enemy_size >= self.field_width {
            return Err(ConfigError::OutsideField("enemy_size"));
        }

        match self.spawn {
            SpawnPolicy::Wave {
                count,
                x,
                spacing,
                y,
                speed,
                speed_step,
            } => {
                if count == 0 {
                    return Err(ConfigError::EmptyWave);
                }
                non_negative("spawn.x", x)?;
                non_negative("spawn.spacing", spacing)?;
                finite("spawn.y", y)?;
                non_negative("spawn.speed", speed)?;
                non_negative("spawn.speed_step", speed_step)?;
            }
            SpawnPolicy::Random {
                one_in,
                spawn_y,
                speed_min,
                speed_max,
            } => {
                if one_in == 0 {
                    return Err(ConfigError::ZeroSpawnChance);
                }
                finite("spawn.spawn_y", spawn_y)?;
                non_negative("spawn.speed_min", speed_min)?;
                finite("spawn.speed_max", speed_max)?;
                // Speeds are drawn as whole numbers
                if speed_max.floor() < speed_min.ceil() {
                    return Err(ConfigError::EmptyRange {
                        min: speed_min,
                        max: speed_max,
                    });
                }
            }
        }

        Ok(())
    }
}

pub(super) fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

pub(super) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(())
}

/// Rejected world tuning
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite(&'static str),
    Negative { name: &'static str, value: f32 },
    NotPositive { name: &'static str, value: f32 },
    /// The named dimension or position does not fit inside the field
    OutsideField(&'static str),
    EmptyRange { min: f32, max: f32 },
    ZeroSpawnChance,
    EmptyWave,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite(name) => write!(f, "{name} must be a finite number"),
            ConfigError::Negative { name, value } => {
                write!(f, "{name} must not be negative (got {value})")
            }
            ConfigError::NotPositive { name, value } => {
                write!(f, "{name} must be greater than zero (got {value})")
            }
            ConfigError::OutsideField(name) => write!(f, "{name} does not fit inside the field"),
            ConfigError::EmptyRange { min, max } => {
                write!(f, "enemy speed range is empty ({min}..={max})")
            }
            ConfigError::ZeroSpawnChance => write!(f, "spawn.one_in must be at least 1"),
            ConfigError::EmptyWave => write!(f, "spawn.count must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
