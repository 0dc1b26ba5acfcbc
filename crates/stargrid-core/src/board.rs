//! Board: the cell arena, the conflict relation, and cause-tracked star
//! placement.
//!
//! A board is an n x n arena of cells. Each cell carries a fixed region color
//! and a mutable player status; `causes` records which star placements (or
//! direct human marks) forced a cell invalid, so removing a star restores
//! exactly the cells it alone had knocked out.

use crate::CellSet;
use serde::{Deserialize, Serialize};

/// A (row, column) coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Linear index into the cell arena of a board with side `size`.
    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Position::index`].
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self::new(idx / size, idx % size)
    }
}

/// Player-visible status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    /// Still a candidate for a star.
    Valid,
    /// Ruled out, either by deduction or by a star's conflict set.
    Invalid,
    /// A placed star.
    Star,
    /// Display-only state for front ends flagging conflicting stars.
    /// The engine never produces it.
    Error,
}

/// Why a cell is invalid. Emptying the list restores the cell to valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    /// Marked by a front end directly.
    Human,
    /// Forced by the star at this position.
    Star(Position),
}

/// One cell of the arena. `color` never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color: u8,
    pub status: CellStatus,
    pub causes: Vec<Cause>,
}

/// An n x n puzzle board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build a fresh board from a color map; every cell starts valid.
    pub fn from_color_map(colors: &[Vec<u8>]) -> Self {
        let size = colors.len();
        let cells = colors
            .iter()
            .flat_map(|row| row.iter())
            .map(|&color| Cell {
                color,
                status: CellStatus::Valid,
                causes: Vec::new(),
            })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.index(self.size)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        let idx = pos.index(self.size);
        &mut self.cells[idx]
    }

    pub fn color(&self, pos: Position) -> u8 {
        self.cell(pos).color
    }

    pub fn status(&self, pos: Position) -> CellStatus {
        self.cell(pos).status
    }

    /// Iterate all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size * size).map(move |idx| Position::from_index(idx, size))
    }

    /// Whether two cells are mutually exclusive: same row or same column
    /// (but not both, so a cell never conflicts with itself), same color,
    /// or king's-move diagonal neighbors.
    pub fn conflicts(&self, a: Position, b: Position) -> bool {
        if (a.row == b.row) != (a.col == b.col) {
            return true;
        }
        if a != b && self.color(a) == self.color(b) {
            return true;
        }
        a.row.abs_diff(b.row) == 1 && a.col.abs_diff(b.col) == 1
    }

    /// Every cell in conflict with `pos`, as a set of linear indices.
    pub fn conflict_set(&self, pos: Position) -> CellSet {
        self.positions()
            .filter(|&other| self.conflicts(pos, other))
            .map(|other| other.index(self.size))
            .collect()
    }

    /// Place a star at `pos` and invalidate its whole conflict set,
    /// recording the star as the cause of each invalidation.
    pub fn place_star(&mut self, pos: Position) {
        {
            let cell = self.cell_mut(pos);
            cell.status = CellStatus::Star;
            cell.causes.clear();
        }
        let conflicts = self.conflict_set(pos);
        for idx in conflicts.iter() {
            let cell = &mut self.cells[idx];
            if cell.status != CellStatus::Star {
                cell.status = CellStatus::Invalid;
                cell.causes.push(Cause::Star(pos));
            }
        }
    }

    /// Remove the star at `pos`, clearing it as a cause everywhere. Cells
    /// left with no causes revert to valid; cells invalidated by other
    /// stars (or by hand) stay invalid.
    pub fn remove_star(&mut self, pos: Position) {
        self.cell_mut(pos).status = CellStatus::Valid;
        for cell in &mut self.cells {
            cell.causes.retain(|c| *c != Cause::Star(pos));
            if cell.causes.is_empty() && cell.status == CellStatus::Invalid {
                cell.status = CellStatus::Valid;
            }
        }
    }

    /// Positions of all stars currently on the board.
    pub fn stars(&self) -> Vec<Position> {
        self.positions()
            .filter(|&pos| self.status(pos) == CellStatus::Star)
            .collect()
    }

    /// A board is a solution iff it has exactly one star per row and no two
    /// stars conflict. One star per column and per color follows from the
    /// pigeonhole structure of n regions over n rows.
    pub fn is_solution(&self) -> bool {
        let stars = self.stars();
        if stars.len() != self.size {
            return false;
        }
        for (i, &a) in stars.iter().enumerate() {
            for &b in &stars[i + 1..] {
                if self.conflicts(a, b) {
                    return false;
                }
            }
        }
        true
    }

    /// The immutable region coloring as a 2D map.
    pub fn color_map(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|r| (0..self.size).map(|c| self.color(Position::new(r, c))).collect())
            .collect()
    }
}

impl std::fmt::Display for Board {
    /// One hex digit per cell for the color, with `*` marking stars and
    /// `.` marking invalidated cells.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let pos = Position::new(row, col);
                let glyph = match self.status(pos) {
                    CellStatus::Star => '*'.to_string(),
                    CellStatus::Invalid => '.'.to_string(),
                    _ => format!("{:x}", self.color(pos)),
                };
                write!(f, "{glyph}")?;
                if col + 1 < self.size {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
