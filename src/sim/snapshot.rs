//! Read-only views handed to renderers after each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{GameEvent, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub rect: Rect,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub pos: Vec2,
    pub size: f32,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks simulated since the last reset
    pub tick: u64,
    /// Field width and height
    pub field: Vec2,
    pub player: Rect,
    pub projectiles: Vec<Rect>,
    pub enemies: Vec<EnemyView>,
    pub stars: Vec<StarView>,
    pub score: u64,
    pub game_over: bool,
    pub wave: u32,
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    pub snapshot: Snapshot,
    /// In the order they happened
    pub events: Vec<GameEvent>,
}

impl TickResult {
    /// Enemies destroyed by projectiles this tick
    pub fn kills(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
            .count()
    }

    /// True when this tick ended the run
    pub fn ended_run(&self) -> bool {
        self.snapshot.game_over
            && self.events.iter().any(|e| {
                matches!(
                    e,
                    GameEvent::PlayerHit { .. } | GameEvent::EnemyEscaped { .. }
                )
            })
    }
}
