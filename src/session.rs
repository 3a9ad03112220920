//! Driver/session loop contract
//!
//! A `Session` owns one `World` and applies a tick's intents in the order a
//! player expects: restart a finished run, otherwise fire, then step.

use crate::sim::{ConfigError, InputIntents, TickResult, World, WorldConfig};

#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    /// Runs finished since the session began
    runs: u32,
    /// Best score across finished and current runs
    best_score: u64,
}

impl Session {
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self::from_world(World::new(config, seed)?))
    }

    pub fn from_world(world: World) -> Self {
        Self {
            world,
            runs: 0,
            best_score: 0,
        }
    }

    /// Apply one tick of input
    pub fn step(&mut self, intents: &InputIntents) -> TickResult {
        if self.world.is_game_over() {
            if intents.restart_pressed_edge {
                log::info!("Restarting after run {} (score {})", self.runs, self.world.score());
                self.world.reset();
            }
        } else if intents.fire_pressed_edge {
            self.world.fire();
        }

        let result = self.world.tick(intents);
        self.best_score = self.best_score.max(result.snapshot.score);
        if result.ended_run() {
            self.runs += 1;
            log::info!("Run {} over with score {}", self.runs, result.snapshot.score);
        }
        result
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }
}
