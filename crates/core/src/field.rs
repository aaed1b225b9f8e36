//! Field module - owns the occupancy grid
//!
//! The field is a 10x22 grid (20 visible rows plus a 2-row hidden buffer on
//! top). Cells are stored in a flat row-major array with no allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right) and row
//! ranges 0..21 (top to bottom). Rows above 0 do not exist as storage but are
//! valid piece positions: they are never occupied and never written.

use crate::pieces::footprint;
use crate::types::{Cell, PieceKind, Rotation, FIELD_COLS, FIELD_ROWS};

/// Total number of cells on the field
pub const FIELD_SIZE: usize = (FIELD_COLS as usize) * (FIELD_ROWS as usize);

const COLS: usize = FIELD_COLS as usize;
const ROWS: usize = FIELD_ROWS as usize;

/// The playfield grid, row-major (`row * COLS + col`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= FIELD_COLS as i8 || row < 0 || row >= FIELD_ROWS as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    pub fn cols(&self) -> u8 {
        FIELD_COLS
    }

    pub fn rows(&self) -> u8 {
        FIELD_ROWS
    }

    /// Get cell at (col, row); `None` if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row). Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the grid and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Whether the piece footprint at the given origin hits a wall, the floor
    /// or an occupied cell.
    ///
    /// Cells above row 0 are never occupied but still have to respect the
    /// side walls.
    pub fn collides(&self, kind: PieceKind, rotation: Rotation, col: i8, row: i8) -> bool {
        footprint(kind, rotation).iter().any(|&(dc, dr)| {
            let c = col + dc;
            let r = row + dr;
            if c < 0 || c >= FIELD_COLS as i8 || r >= FIELD_ROWS as i8 {
                return true;
            }
            r >= 0 && self.is_occupied(c, r)
        })
    }

    /// Write the piece into the grid. Minos above row 0 are dropped.
    pub fn place(&mut self, kind: PieceKind, rotation: Rotation, col: i8, row: i8) {
        for (dc, dr) in footprint(kind, rotation) {
            // `set` ignores anything outside the grid, including negative rows.
            self.set(col + dc, row + dr, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Remove one row, shifting every row above it down by one and inserting
    /// an empty row at the top.
    fn remove_row(&mut self, row: usize) {
        self.cells.copy_within(0..row * COLS, COLS);
        self.cells[..COLS].fill(None);
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Rows are scanned top to bottom. Removing a row only moves rows that
    /// were already scanned, so each row index is checked exactly once and
    /// every simultaneously full row is cleared in one call.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for row in 0..ROWS {
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            }
        }
        cleared
    }

    /// Number of filled cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the grid as piece ids (`0` empty, `id + 1` filled).
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (row, line) in out.iter_mut().enumerate() {
            for (col, slot) in line.iter_mut().enumerate() {
                *slot = match self.cells[row * COLS + col] {
                    Some(kind) => kind.index() + 1,
                    None => 0,
                };
            }
        }
    }

    /// Clear the entire field
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
