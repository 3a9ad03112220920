//! Render adapters
//!
//! Readers of `sim::Snapshot`; nothing here feeds back into the world.

pub mod grid;
pub mod terminal;

pub use grid::{Cell, Grid};
pub use terminal::{Hud, TerminalRenderer};
