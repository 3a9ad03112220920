//! Terminal renderer
//!
//! Draws a `Grid` plus a one-line HUD with crossterm. No game logic lives
//! here; the renderer only reads snapshots.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::grid::{Cell, Grid};
use crate::sim::Snapshot;

// Colour palette
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_INFO: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Cyan;
const C_PROJECTILE: Color = Color::White;
const C_STAR: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

/// Extra HUD values owned by the driver, not the world
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub variant: &'static str,
    pub best_score: u64,
    pub fps: Option<u32>,
    pub restart_hint: &'static str,
}

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render one complete frame sized to `cols x rows` terminal cells
    pub fn draw(
        &mut self,
        snapshot: &Snapshot,
        hud: &Hud,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        // Row 0 holds the HUD
        let field_rows = rows.saturating_sub(1);
        let grid = Grid::rasterize(snapshot, cols, field_rows);

        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.draw_hud(snapshot, hud, cols)?;
        self.draw_grid(&grid)?;
        if snapshot.game_over {
            self.draw_game_over(snapshot, hud, cols, rows)?;
        }

        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        self.out.flush()
    }

    fn draw_hud(&mut self, snapshot: &Snapshot, hud: &Hud, cols: u16) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score: {:>6}", snapshot.score)))?;

        let mut info = format!("{}  Best: {}", hud.variant, hud.best_score);
        if snapshot.wave > 0 {
            info.push_str(&format!("  Wave: {}", snapshot.wave));
        }
        if let Some(fps) = hud.fps {
            info.push_str(&format!("  {} Hz", fps));
        }
        let x = cols.saturating_sub(info.chars().count() as u16 + 1);
        self.out.queue(cursor::MoveTo(x, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_INFO))?;
        self.out.queue(Print(info))?;
        Ok(())
    }

    fn draw_grid(&mut self, grid: &Grid) -> std::io::Result<()> {
        for row in 0..grid.rows() {
            for (col, cell) in grid.row(row).iter().enumerate() {
                let color = match cell {
                    Cell::Empty => continue,
                    Cell::Star => C_STAR,
                    Cell::Enemy(rgb) => Color::Rgb {
                        r: rgb.r,
                        g: rgb.g,
                        b: rgb.b,
                    },
                    Cell::Projectile => C_PROJECTILE,
                    Cell::Player => C_PLAYER,
                };
                self.out.queue(cursor::MoveTo(col as u16, row + 1))?;
                self.out.queue(style::SetForegroundColor(color))?;
                self.out.queue(Print(cell.glyph()))?;
            }
        }
        Ok(())
    }

    fn draw_game_over(
        &mut self,
        snapshot: &Snapshot,
        hud: &Hud,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        let cy = rows / 2;
        let lines = [
            ("GAME OVER".to_string(), C_GAME_OVER),
            (format!("Final score: {}", snapshot.score), C_HUD_SCORE),
            (hud.restart_hint.to_string(), C_HUD_INFO),
        ];
        for (i, (text, color)) in lines.iter().enumerate() {
            let x = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(x, (cy + i as u16).saturating_sub(1)))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(text))?;
        }
        Ok(())
    }
}
