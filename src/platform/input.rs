//! Key events to per-tick intents
//!
//! Movement keys are level-triggered (held = moving). Fire and restart are
//! edge-triggered: only an up-to-down transition raises them, so holding a
//! key or receiving auto-repeat presses never fires twice.

use std::collections::HashSet;

use crate::sim::InputIntents;

/// Platform-neutral game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Tracks held keys and pending edges between ticks
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    held: HashSet<Key>,
    fire_edge: bool,
    restart_edge: bool,
    quit: bool,
    /// The fire key also restarts a finished run
    fire_restarts: bool,
}

impl InputAdapter {
    pub fn new(fire_restarts: bool) -> Self {
        Self {
            fire_restarts,
            ..Self::default()
        }
    }

    pub fn handle(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Down(key) => {
                // Only a fresh press counts as an edge
                if !self.held.insert(key) {
                    return;
                }
                match key {
                    Key::Fire => {
                        self.fire_edge = true;
                        if self.fire_restarts {
                            self.restart_edge = true;
                        }
                    }
                    Key::Restart => self.restart_edge = true,
                    Key::Quit => self.quit = true,
                    Key::Left | Key::Right => {}
                }
            }
            KeyEvent::Up(key) => {
                self.held.remove(&key);
            }
        }
    }

    pub fn handle_all(&mut self, events: impl IntoIterator<Item = KeyEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Intents for the coming tick; pending edges are consumed
    pub fn take_intents(&mut self) -> InputIntents {
        let intents = InputIntents {
            moving_left: self.is_held(Key::Left),
            moving_right: self.is_held(Key::Right),
            fire_pressed_edge: self.fire_edge,
            restart_pressed_edge: self.restart_edge,
        };
        self.fire_edge = false;
        self.restart_edge = false;
        intents
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Forget held keys (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
