//! Demo pilot
//!
//! Produces the same `InputIntents` a human would, so headless runs and the
//! attract mode go through the normal input path.

use super::state::World;
use super::tick::InputIntents;

/// Ticks between autopilot shots
const FIRE_INTERVAL: u32 = 8;
/// How many ticks of enemy travel count as "about to land on us"
const DANGER_TICKS: f32 = 12.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide this tick's input
    pub fn intents(&mut self, world: &World) -> InputIntents {
        if world.is_game_over() {
            self.cooldown = 0;
            return InputIntents {
                restart_pressed_edge: true,
                ..Default::default()
            };
        }

        let player = world.player().bounds();
        let player_center = player.center().x;
        let mut intents = InputIntents::default();

        // Dodge anything that will reach the ship soon and shares its column
        let danger = world.enemies().iter().find(|e| {
            let b = e.bounds();
            let horizon = player.top() - e.speed * DANGER_TICKS;
            b.bottom() > horizon
                && b.top() < player.bottom()
                && b.left() < player.right()
                && player.left() < b.right()
        });
        if let Some(enemy) = danger {
            let enemy_center = enemy.bounds().center().x;
            let room_left = player.left();
            let room_right = world.config().player_max_x() - player.left();
            // Head for whichever side has room, preferring away from the enemy
            if (player_center >= enemy_center && room_right > 0.0) || room_left <= 0.0 {
                intents.moving_right = true;
            } else {
                intents.moving_left = true;
            }
        } else if let Some(target) = world
            .enemies()
            .iter()
            .filter(|e| e.bounds().bottom() < player.top())
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        {
            // Line up under the lowest enemy still above us
            let dx = target.bounds().center().x - player_center;
            if dx > world.player().speed / 2.0 {
                intents.moving_right = true;
            } else if dx < -world.player().speed / 2.0 {
                intents.moving_left = true;
            }
            if dx.abs() < target.size / 2.0 && self.cooldown == 0 {
                intents.fire_pressed_edge = true;
                self.cooldown = FIRE_INTERVAL;
            }
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::{SpawnPolicy, WorldConfig};

    fn quiet_arcade() -> WorldConfig {
        let mut config = WorldConfig::arcade();
        config.spawn = SpawnPolicy::Random {
            one_in: u32::MAX,
            spawn_y: -40.0,
            speed_min: 2.0,
            speed_max: 4.0,
        };
        config
    }

    #[test]
    fn test_restarts_after_game_over() {
        let mut world = World::new(quiet_arcade(), 1).unwrap();
        world.spawn_enemy_at(380.0, 470.0, 0.0);
        world.tick(&InputIntents::default());
        assert!(world.is_game_over());

        let intents = Autopilot::new().intents(&world);
        assert!(intents.restart_pressed_edge);
    }

    #[test]
    fn test_tracks_and_fires() {
        let mut world = World::new(quiet_arcade(), 1).unwrap();
        world.spawn_enemy_at(600.0, 100.0, 0.0);
        let mut pilot = Autopilot::new();

        let intents = pilot.intents(&world);
        assert!(intents.moving_right);
        assert!(!intents.fire_pressed_edge);

        let mut fired = false;
        for _ in 0..200 {
            let intents = pilot.intents(&world);
            if intents.fire_pressed_edge {
                world.fire();
                fired = true;
            }
            world.tick(&intents);
            if world.score() > 0 {
                break;
            }
        }
        assert!(fired);
        assert_eq!(world.score(), 10);
    }

    #[test]
    fn test_dodges_low_enemy() {
        let mut world = World::new(quiet_arcade(), 1).unwrap();
        // Slightly left of the ship's center, close above it
        world.spawn_enemy_at(370.0, 440.0, 4.0);
        let intents = Autopilot::new().intents(&world);
        assert!(intents.moving_right);
        assert!(!intents.moving_left);
    }

    #[test]
    fn test_scores_in_classic_cabinet() {
        let mut world = World::new(WorldConfig::classic(), 3).unwrap();
        let mut pilot = Autopilot::new();
        for _ in 0..300 {
            let intents = pilot.intents(&world);
            if intents.fire_pressed_edge {
                world.fire();
            }
            world.tick(&intents);
        }
        assert!(world.score() >= 30, "score {}", world.score());
    }
}
