//! Pieces module - tetromino catalog and rotation kicks
//!
//! Every (kind, rotation) pair has a 4x4 local footprint stored as a 16-bit
//! mask. Local cell `(row, col)` is bit `row * 4 + col` counted from the most
//! significant bit, so each literal below reads as four nibble rows, top row
//! first.
//!
//! Rotation uses a deliberately small kick list instead of SRS: the six
//! offsets in [`KICK_OFFSETS`] are tried in order and the first one that fits
//! wins.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Offset of a single mino relative to piece origin, as `(col, row)`.
pub type MinoOffset = (i8, i8);

/// Filled local cells of one footprint, row-major.
pub type Footprint = ArrayVec<MinoOffset, 4>;

/// Footprint masks indexed by `[kind][rotation]`.
const SHAPES: [[u16; 4]; 7] = [
    // I
    [
        0b0000_1111_0000_0000,
        0b0010_0010_0010_0010,
        0b0000_0000_1111_0000,
        0b0100_0100_0100_0100,
    ],
    // O
    [
        0b0000_0110_0110_0000,
        0b0000_0110_0110_0000,
        0b0000_0110_0110_0000,
        0b0000_0110_0110_0000,
    ],
    // T
    [
        0b0000_0100_1110_0000,
        0b0000_0100_0110_0100,
        0b0000_0000_1110_0100,
        0b0000_0100_1100_0100,
    ],
    // S
    [
        0b0000_0110_1100_0000,
        0b0000_0100_0110_0010,
        0b0000_0000_0110_1100,
        0b0000_1000_1100_0100,
    ],
    // Z
    [
        0b0000_1100_0110_0000,
        0b0000_0010_0110_0100,
        0b0000_0000_1100_0110,
        0b0000_0100_1100_1000,
    ],
    // J
    [
        0b0000_1000_1110_0000,
        0b0000_0110_0100_0100,
        0b0000_0000_1110_0010,
        0b0000_0100_0100_1100,
    ],
    // L
    [
        0b0000_0010_1110_0000,
        0b0000_0100_0100_0110,
        0b0000_0000_1110_1000,
        0b0000_1100_0100_0100,
    ],
];

/// Kick offsets `(d_col, d_row)` tried in this exact order on rotation.
pub const KICK_OFFSETS: [MinoOffset; 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Spawn origin `(col, row)` for new pieces
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_COL, SPAWN_ROW);

/// Raw footprint mask for a piece kind and rotation
#[inline]
pub fn shape_mask(kind: PieceKind, rotation: Rotation) -> u16 {
    SHAPES[kind.index() as usize][rotation.index() as usize]
}

/// Whether local cell `(row, col)` of the footprint is filled.
///
/// Cells outside the 4x4 box are never filled.
#[inline]
pub fn is_filled(kind: PieceKind, rotation: Rotation, row: u8, col: u8) -> bool {
    if row >= 4 || col >= 4 {
        return false;
    }
    let bit = row * 4 + col;
    (shape_mask(kind, rotation) >> (15 - bit)) & 1 == 1
}

/// Filled local cells for a piece kind and rotation, row-major.
pub fn footprint(kind: PieceKind, rotation: Rotation) -> Footprint {
    let mut cells = Footprint::new();
    for row in 0..4u8 {
        for col in 0..4u8 {
            if is_filled(kind, rotation, row, col) {
                cells.push((col as i8, row as i8));
            }
        }
    }
    cells
}

/// Try to rotate a piece with the kick list.
///
/// `collides(rotation, col, row)` reports whether the piece would collide at
/// the given origin. Returns the new rotation and the applied kick if any
/// offset fits, `None` if all six collide.
pub fn try_rotate(
    rotation: Rotation,
    col: i8,
    row: i8,
    clockwise: bool,
    mut collides: impl FnMut(Rotation, i8, i8) -> bool,
) -> Option<(Rotation, MinoOffset)> {
    let new_rotation = rotation.turned(clockwise);

    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&(dc, dr)| !collides(new_rotation, col + dc, row + dr))
        .map(|kick| (new_rotation, kick))
}
