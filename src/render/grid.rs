//! Snapshot to character grid projection
//!
//! Pure: maps field coordinates onto a `cols x rows` cell grid. A rectangle
//! covers every cell it touches and always at least one.

use crate::sim::{Rect, Rgb, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Star,
    Enemy(Rgb),
    Projectile,
    Player,
}

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Star => '.',
            Cell::Enemy(_) => '@',
            Cell::Projectile => '|',
            Cell::Player => 'A',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::Empty; cols as usize * rows as usize],
        }
    }

    /// Draw order: stars, enemies, projectiles, then the ship on top
    pub fn rasterize(snapshot: &Snapshot, cols: u16, rows: u16) -> Self {
        let mut grid = Self::new(cols, rows);
        if cols == 0 || rows == 0 {
            return grid;
        }
        let sx = cols as f32 / snapshot.field.x;
        let sy = rows as f32 / snapshot.field.y;

        for star in &snapshot.stars {
            let rect = Rect::from_parts(star.pos, glam::Vec2::splat(star.size));
            grid.fill(&rect, sx, sy, Cell::Star);
        }
        for enemy in &snapshot.enemies {
            grid.fill(&enemy.rect, sx, sy, Cell::Enemy(enemy.color));
        }
        for projectile in &snapshot.projectiles {
            grid.fill(projectile, sx, sy, Cell::Projectile);
        }
        grid.fill(&snapshot.player, sx, sy, Cell::Player);
        grid
    }

    fn fill(&mut self, rect: &Rect, sx: f32, sy: f32, cell: Cell) {
        let Some((c0, c1)) = span(rect.left() * sx, rect.right() * sx, self.cols) else {
            return;
        };
        let Some((r0, r1)) = span(rect.top() * sy, rect.bottom() * sy, self.rows) else {
            return;
        };
        for row in r0..r1 {
            for col in c0..c1 {
                let idx = row as usize * self.cols as usize + col as usize;
                self.cells[idx] = cell;
            }
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn get(&self, col: u16, row: u16) -> Cell {
        if col >= self.cols || row >= self.rows {
            return Cell::Empty;
        }
        self.cells[row as usize * self.cols as usize + col as usize]
    }

    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    /// One row as plain text
    pub fn row_string(&self, row: u16) -> String {
        self.row(row).iter().map(Cell::glyph).collect()
    }
}

/// Cell range `[start, end)` covered by `[lo, hi)`, clipped to `0..limit`
fn span(lo: f32, hi: f32, limit: u16) -> Option<(u16, u16)> {
    let start = lo.floor();
    let end = hi.ceil().max(start + 1.0);
    if end <= 0.0 || start >= limit as f32 {
        return None;
    }
    let start = start.max(0.0) as u16;
    let end = end.min(limit as f32) as u16;
    Some((start, end))
}
