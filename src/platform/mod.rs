//! Platform abstraction layer
//!
//! Handles terminal/toolkit differences for:
//! - Input events (raw key events to per-tick intents)
//! - Key release detection on terminals that never report releases

pub mod input;
pub mod terminal;

pub use input::{InputAdapter, Key, KeyEvent};
pub use terminal::TerminalKeys;
