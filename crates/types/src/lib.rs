//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation, the terminal front-end and the headless runner alike.
//!
//! # Field Dimensions
//!
//! - **Columns**: 10 (indexed 0-9)
//! - **Visible rows**: 20
//! - **Hidden rows**: 2 above the visible area, used as spawn headroom
//! - **Total rows**: 22 (indexed 0-21, row 0 is the top of the hidden buffer)
//! - **Spawn origin**: column 3, row -1
//!
//! # Frame Timing
//!
//! The simulation counts frames, not milliseconds. One tick is one frame at a
//! nominal 60 Hz.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal frame length used by hosts |
//! | `BASE_FALL_FRAMES` | 30 | Gravity interval at level 1 |
//! | `FALL_SPEEDUP_FRAMES` | 2 | Interval reduction per level |
//! | `MIN_FALL_FRAMES` | 5 | Fastest gravity interval |
//! | `SOFT_DROP_FALL_FRAMES` | 2 | Gravity interval while soft drop is held |
//! | `LOCK_DELAY_FRAMES` | 24 | Grounded frames tolerated before a forced lock |
//!
//! # Examples
//!
//! ```
//! use tetris96_types::{Button, PieceKind, Rotation, FIELD_COLS, FIELD_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.index(), 2);
//!
//! assert_eq!(Rotation::North.turned(true), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(Button::from_str("hardDrop"), Some(Button::HardDrop));
//!
//! assert_eq!(FIELD_COLS, 10);
//! assert_eq!(FIELD_ROWS, 22);
//! ```

/// Field width in cells.
pub const FIELD_COLS: u8 = 10;

/// Rows shown to the player.
pub const VISIBLE_ROWS: u8 = 20;

/// Rows above the visible area that are never drawn.
pub const HIDDEN_ROWS: u8 = 2;

/// Total grid height including the hidden buffer.
pub const FIELD_ROWS: u8 = VISIBLE_ROWS + HIDDEN_ROWS;

/// Origin column for newly spawned pieces.
pub const SPAWN_COL: i8 = 3;

/// Origin row for newly spawned pieces (one row above the grid, so the
/// footprint lands in the hidden buffer).
pub const SPAWN_ROW: i8 = -1;

/// Nominal frame length in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1, in frames.
pub const BASE_FALL_FRAMES: u32 = 30;

/// Frames removed from the gravity interval per level above 1.
pub const FALL_SPEEDUP_FRAMES: u32 = 2;

/// Gravity interval floor, in frames.
pub const MIN_FALL_FRAMES: u32 = 5;

/// Gravity interval while soft drop is held, in frames.
pub const SOFT_DROP_FALL_FRAMES: u32 = 2;

/// A grounded piece locks once its lock-delay counter exceeds this value.
pub const LOCK_DELAY_FRAMES: u32 = 24;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear awards indexed by rows cleared at once, multiplied by level.
pub const LINE_AWARDS: [u32; 5] = [0, 100, 300, 500, 800];

/// Bonus per cell travelled by a hard drop (not level-scaled).
pub const HARD_DROP_POINTS_PER_CELL: u32 = 2;

/// Store key of the persisted high score record.
pub const HIGH_SCORE_KEY: &str = "tetris_high_score_v1";

/// Seed substituted for zero, which is a fixed point of xorshift.
pub const DEFAULT_RNG_SEED: u32 = 0x1234_5678;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_parity_timing_defaults() {
        assert_eq!(BASE_FALL_FRAMES, 30);
        assert_eq!(FALL_SPEEDUP_FRAMES, 2);
        assert_eq!(MIN_FALL_FRAMES, 5);
        assert_eq!(SOFT_DROP_FALL_FRAMES, 2);
        assert_eq!(LOCK_DELAY_FRAMES, 24);
        assert_eq!(FIELD_ROWS, 22);
    }

    #[test]
    fn fall_interval_follows_level_curve() {
        let rules = Rules::default();
        assert_eq!(rules.fall_interval(1, false), 30);
        assert_eq!(rules.fall_interval(2, false), 28);
        assert_eq!(rules.fall_interval(13, false), 6);
        assert_eq!(rules.fall_interval(14, false), 5);
        assert_eq!(rules.fall_interval(500, false), 5);
        assert_eq!(rules.fall_interval(1, true), 2);
        assert_eq!(rules.fall_interval(0, false), 30);
    }

    #[test]
    fn rotation_index_wraps_mod_four() {
        for i in 0..16u8 {
            assert_eq!(Rotation::from_index(i).index(), i % 4);
        }
        assert_eq!(Rotation::West.turned(true), Rotation::North);
        assert_eq!(Rotation::North.turned(false), Rotation::West);
    }

    #[test]
    fn piece_ids_are_stable() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn button_indices_are_dense() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
            assert_eq!(Button::from_str(button.as_str()), Some(*button));
        }
    }
}

/// The seven tetromino piece kinds
///
/// The declaration order is the piece-type id (I=0 .. L=6) that the field
/// stores and the RNG draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Piece-type id in `0..7`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::index`].
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris96_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation state of a piece.
///
/// The index (North=0 .. West=3) selects the catalog footprint. Clockwise
/// rotation adds one, counter-clockwise subtracts one, always mod 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation state index in `0..4`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Build a rotation from any integer index, taken mod 4.
    pub fn from_index(index: u8) -> Self {
        match index & 3 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotate one step in the given direction.
    pub fn turned(self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Logical buttons sampled once per tick.
///
/// Movement, rotation, hard drop, pause and restart are edge-triggered;
/// soft drop is level-triggered (active while held).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Faster gravity while held
    SoftDrop,
    /// Drop to the landing row and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Reinitialize the session with a fresh seed
    Restart,
}

impl Button {
    /// Number of logical buttons.
    pub const COUNT: usize = 8;

    /// All buttons in index order.
    pub const ALL: [Button; Button::COUNT] = [
        Button::MoveLeft,
        Button::MoveRight,
        Button::SoftDrop,
        Button::HardDrop,
        Button::RotateCw,
        Button::RotateCcw,
        Button::Pause,
        Button::Restart,
    ];

    /// Dense index in `0..Button::COUNT`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse button from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris96_types::Button;
    ///
    /// assert_eq!(Button::from_str("moveLeft"), Some(Button::MoveLeft));
    /// assert_eq!(Button::from_str("rotatecw"), Some(Button::RotateCw));
    /// assert_eq!(Button::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Button::MoveLeft),
            "moveright" => Some(Button::MoveRight),
            "softdrop" => Some(Button::SoftDrop),
            "harddrop" => Some(Button::HardDrop),
            "rotatecw" => Some(Button::RotateCw),
            "rotateccw" => Some(Button::RotateCcw),
            "pause" => Some(Button::Pause),
            "restart" => Some(Button::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Button::MoveLeft => "moveLeft",
            Button::MoveRight => "moveRight",
            Button::SoftDrop => "softDrop",
            Button::HardDrop => "hardDrop",
            Button::RotateCw => "rotateCw",
            Button::RotateCcw => "rotateCcw",
            Button::Pause => "pause",
            Button::Restart => "restart",
        }
    }
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Tunable gameplay rules.
///
/// `Rules::default()` reproduces the constants above. Hosts may override
/// individual values (e.g. a longer lock delay) when building a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub base_fall_frames: u32,
    pub fall_speedup_frames: u32,
    pub min_fall_frames: u32,
    pub soft_drop_fall_frames: u32,
    pub lock_delay_frames: u32,
    pub hard_drop_points_per_cell: u32,
}

impl Rules {
    /// Gravity interval in frames for `level`, or the soft-drop interval while
    /// soft drop is held.
    pub fn fall_interval(&self, level: u32, soft_drop: bool) -> u32 {
        if soft_drop {
            return self.soft_drop_fall_frames.max(1);
        }
        let speedup = self
            .fall_speedup_frames
            .saturating_mul(level.saturating_sub(1));
        self.base_fall_frames
            .saturating_sub(speedup)
            .max(self.min_fall_frames)
            .max(1)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_fall_frames: BASE_FALL_FRAMES,
            fall_speedup_frames: FALL_SPEEDUP_FRAMES,
            min_fall_frames: MIN_FALL_FRAMES,
            soft_drop_fall_frames: SOFT_DROP_FALL_FRAMES,
            lock_delay_frames: LOCK_DELAY_FRAMES,
            hard_drop_points_per_cell: HARD_DROP_POINTS_PER_CELL,
        }
    }
}
