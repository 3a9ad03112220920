//! Fixed timestep accumulator
//!
//! Converts wall-clock frame time into a whole number of simulation steps.
//! Long stalls are clamped so the game never tries to catch up seconds of
//! backlog in one frame.

use std::time::Duration;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// `hz` must be positive (validated by `WorldConfig`)
    pub fn from_hz(hz: f32) -> Self {
        Self {
            step: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> Duration {
        Duration::from_secs_f32(self.step)
    }

    /// Add frame time and return how many steps to simulate now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let dt = elapsed.as_secs_f32().min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }

        // Drop backlog we refused to simulate
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Time until the next step is due
    pub fn until_next(&self) -> Duration {
        Duration::from_secs_f32((self.step - self.accumulator).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_steps() {
        let mut clock = FixedTimestep::from_hz(50.0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 0);
        assert_eq!(clock.advance(Duration::from_millis(10)), 1);
        assert_eq!(clock.advance(Duration::from_millis(45)), 2);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = FixedTimestep::from_hz(1000.0);
        assert_eq!(clock.advance(Duration::from_millis(100)), MAX_SUBSTEPS);
        // Backlog was discarded
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_stall_clamped() {
        let mut clock = FixedTimestep::from_hz(20.0);
        // A five second stall counts as 100 ms: two steps
        assert_eq!(clock.advance(Duration::from_secs(5)), 2);
    }

    #[test]
    fn test_until_next() {
        let mut clock = FixedTimestep::from_hz(10.0);
        clock.advance(Duration::from_millis(40));
        let wait = clock.until_next();
        assert!(wait > Duration::from_millis(55) && wait < Duration::from_millis(65));
    }
}
