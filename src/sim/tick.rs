//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. The step order
//! below is part of the contract; scenario tests depend on it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{BottomPolicy, SpawnPolicy};
use super::snapshot::TickResult;
use super::state::{GameEvent, Rgb, World};

/// Sanitized player input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntents {
    pub moving_left: bool,
    pub moving_right: bool,
    /// Fire control went down since the previous tick
    pub fire_pressed_edge: bool,
    /// Restart control went down since the previous tick
    pub restart_pressed_edge: bool,
}

impl World {
    /// Advance the world by one step
    pub fn tick(&mut self, input: &InputIntents) -> TickResult {
        let mut events = Vec::new();

        // Nothing moves once the run has ended
        if self.game_over {
            return TickResult {
                snapshot: self.snapshot(),
                events,
            };
        }

        self.tick_count += 1;

        // Player
        self.player.moving_left = input.moving_left;
        self.player.moving_right = input.moving_right;
        self.player.update(self.config.player_max_x());

        // Starfield
        let field = Vec2::new(self.config.field_width, self.config.field_height);
        for star in &mut self.stars {
            star.update(field, &mut self.star_rng);
        }

        // Projectiles
        for projectile in &mut self.projectiles {
            projectile.update();
        }
        self.projectiles.retain(|p| {
            if p.is_expired() {
                events.push(GameEvent::ProjectileExpired { id: p.id });
                false
            } else {
                true
            }
        });

        // Spawns
        self.spawn_enemies(&mut events);

        // Enemy movement
        for enemy in &mut self.enemies {
            enemy.update();
        }

        // Bottom boundary
        let escape_y = self.config.escape_y;
        match self.config.bottom {
            BottomPolicy::Remove => {
                self.enemies.retain(|e| {
                    if e.pos.y > escape_y {
                        log::debug!("Enemy {} escaped", e.id);
                        events.push(GameEvent::EnemyEscaped { id: e.id });
                        false
                    } else {
                        true
                    }
                });
            }
            BottomPolicy::GameOver => {
                if let Some(enemy) = self.enemies.iter().find(|e| e.pos.y > escape_y) {
                    log::info!("Enemy {} reached the bottom, game over", enemy.id);
                    events.push(GameEvent::EnemyEscaped { id: enemy.id });
                    self.game_over = true;
                    return self.finish(events);
                }
            }
        }

        // Enemy vs player
        let player_box = self.player.bounds();
        if let Some(idx) = self
            .enemies
            .iter()
            .position(|e| e.bounds().intersects(&player_box))
        {
            let enemy = self.enemies.remove(idx);
            log::info!("Player hit by enemy {}, game over", enemy.id);
            events.push(GameEvent::PlayerHit { enemy_id: enemy.id });
            self.game_over = true;
            return self.finish(events);
        }

        // Enemy vs projectile: each enemy takes the first projectile touching it
        let mut i = 0;
        while i < self.enemies.len() {
            let enemy_box = self.enemies[i].bounds();
            let hit = self
                .projectiles
                .iter()
                .position(|p| p.bounds().intersects(&enemy_box));
            match hit {
                Some(j) => {
                    let projectile = self.projectiles.remove(j);
                    let enemy = self.enemies.remove(i);
                    self.score += self.config.reward;
                    log::debug!(
                        "Enemy {} destroyed by projectile {} (score {})",
                        enemy.id,
                        projectile.id,
                        self.score
                    );
                    events.push(GameEvent::EnemyDestroyed {
                        enemy_id: enemy.id,
                        projectile_id: projectile.id,
                        score: self.score,
                    });
                }
                None => i += 1,
            }
        }

        // A cleared wave is replaced before the frame is drawn
        if self.enemies.is_empty() {
            if let Some(event) = self.spawn_wave() {
                events.push(event);
            }
        }

        self.finish(events)
    }

    fn finish(&self, events: Vec<GameEvent>) -> TickResult {
        TickResult {
            snapshot: self.snapshot(),
            events,
        }
    }

    fn spawn_enemies(&mut self, events: &mut Vec<GameEvent>) {
        match self.config.spawn {
            SpawnPolicy::Wave { .. } => {
                if self.enemies.is_empty() {
                    if let Some(event) = self.spawn_wave() {
                        events.push(event);
                    }
                }
            }
            SpawnPolicy::Random {
                one_in,
                spawn_y,
                speed_min,
                speed_max,
            } => {
                if self.rng.random_range(0..one_in) == 0 {
                    let max_x = self.config.field_width - self.config.enemy_size;
                    let x = self.rng.random_range(0.0..max_x).floor();
                    // Whole units per tick, like the x column
                    let slowest = speed_min.ceil() as u32;
                    let fastest = speed_max.floor() as u32;
                    let speed = self.rng.random_range(slowest..=fastest) as f32;
                    let color = Rgb::random(&mut self.rng);
                    let id = self.push_enemy(Vec2::new(x, spawn_y), speed, color);
                    log::debug!("Enemy {} spawned at x={} speed={}", id, x, speed);
                    events.push(GameEvent::EnemySpawned { id });
                }
            }
        }
    }
}
