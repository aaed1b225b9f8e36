use crate::piece::ActivePiece;
use crate::types::{PieceKind, Rotation, FIELD_COLS, FIELD_ROWS};

/// Grid of piece ids: `0` empty, `id + 1` filled. Includes the hidden rows.
pub type SnapshotGrid = [[u8; FIELD_COLS as usize]; FIELD_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    /// Rows until the piece lands; the ghost sits at `row + drop_distance`.
    pub drop_distance: u8,
}

impl ActiveSnapshot {
    pub fn new(piece: ActivePiece, drop_distance: u8) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            col: piece.col,
            row: piece.row,
            drop_distance,
        }
    }

    pub fn ghost_row(&self) -> i8 {
        self.row.saturating_add(self.drop_distance as i8)
    }
}

/// Read-only view of a session for renderers and headless hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub field: SnapshotGrid,
    /// `None` once the game is over.
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub high_score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub frame: u64,
    pub rng_state: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.field = [[0u8; FIELD_COLS as usize]; FIELD_ROWS as usize];
        self.active = None;
        self.next = PieceKind::I;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.high_score = 0;
        self.paused = false;
        self.game_over = false;
        self.frame = 0;
        self.rng_state = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            field: [[0u8; FIELD_COLS as usize]; FIELD_ROWS as usize],
            active: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 1,
            high_score: 0,
            paused: false,
            game_over: false,
            frame: 0,
            rng_state: 0,
        };
        s.clear();
        s
    }
}
