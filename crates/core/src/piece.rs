//! Active piece controller - current/next piece, movement, rotation, spawning
//!
//! The controller owns the RNG because it is only ever consulted when a new
//! piece is queued. All collision questions are answered by the [`Field`]
//! passed in by the session.

use crate::field::Field;
use crate::pieces::{footprint, try_rotate, Footprint, SPAWN_POSITION};
use crate::rng::Xorshift32;
use crate::types::{PieceKind, Rotation};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
}

impl ActivePiece {
    /// Create a new piece at the spawn origin
    pub fn spawn(kind: PieceKind) -> Self {
        let (col, row) = SPAWN_POSITION;
        Self {
            kind,
            rotation: Rotation::North,
            col,
            row,
        }
    }

    /// Filled local cells for the current rotation
    pub fn footprint(&self) -> Footprint {
        footprint(self.kind, self.rotation)
    }

    /// Absolute `(col, row)` of every mino.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.footprint()
            .into_iter()
            .map(move |(dc, dr)| (self.col + dc, self.row + dr))
    }

    pub fn collides(&self, field: &Field) -> bool {
        field.collides(self.kind, self.rotation, self.col, self.row)
    }
}

/// Owns the current piece, the queued next kind and the RNG that feeds them.
#[derive(Debug, Clone)]
pub struct PieceController {
    current: ActivePiece,
    next: PieceKind,
    rng: Xorshift32,
}

impl PieceController {
    /// Seed the RNG and draw the opening current and next pieces.
    pub fn new(seed: u32) -> Self {
        let mut rng = Xorshift32::new(seed);
        let current = ActivePiece::spawn(rng.next_piece());
        let next = rng.next_piece();
        Self { current, next, rng }
    }

    /// Reinitialize in place with a new seed.
    pub fn reset(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    pub fn current(&self) -> ActivePiece {
        self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Whether the current piece fits where it is.
    pub fn fits(&self, field: &Field) -> bool {
        !self.current.collides(field)
    }

    /// Promote the queued kind to current at the spawn origin and queue a new
    /// one. Returns false if the new piece collides immediately (top out).
    pub fn spawn(&mut self, field: &Field) -> bool {
        self.current = ActivePiece::spawn(self.next);
        self.next = self.rng.next_piece();
        self.fits(field)
    }

    /// Move by `(d_col, d_row)` if the target is free.
    pub fn try_move(&mut self, field: &Field, d_col: i8, d_row: i8) -> bool {
        let target = ActivePiece {
            col: self.current.col + d_col,
            row: self.current.row + d_row,
            ..self.current
        };
        if target.collides(field) {
            return false;
        }
        self.current = target;
        true
    }

    /// Rotate one step, trying the kick offsets in order.
    pub fn try_rotate(&mut self, field: &Field, clockwise: bool) -> bool {
        let piece = self.current;
        let result = try_rotate(piece.rotation, piece.col, piece.row, clockwise, |rot, c, r| {
            field.collides(piece.kind, rot, c, r)
        });

        match result {
            Some((rotation, (dc, dr))) => {
                self.current = ActivePiece {
                    rotation,
                    col: piece.col + dc,
                    row: piece.row + dr,
                    ..piece
                };
                true
            }
            None => false,
        }
    }

    /// Rows the current piece can fall before landing.
    pub fn hard_drop_distance(&self, field: &Field) -> u8 {
        let piece = self.current;
        let mut distance: u8 = 0;
        while !field.collides(
            piece.kind,
            piece.rotation,
            piece.col,
            piece.row + distance as i8 + 1,
        ) {
            distance += 1;
        }
        distance
    }

    /// Move the piece to its landing row and return the distance travelled.
    pub fn drop_to_floor(&mut self, field: &Field) -> u8 {
        let distance = self.hard_drop_distance(field);
        self.current.row += distance as i8;
        distance
    }

    /// Write the current piece into the field.
    pub fn lock_into(&self, field: &mut Field) {
        let piece = self.current;
        field.place(piece.kind, piece.rotation, piece.col, piece.row);
    }
}
