//! Core game logic - pure, deterministic, frame-driven
//!
//! This crate holds the authoritative game state and the rules that evolve
//! it. It knows nothing about terminals or files: input arrives through
//! [`ButtonSource`], persistence goes through [`ScoreStore`] and seeding reads
//! a [`Clock`], all implemented by hosts.
//!
//! # Module Structure
//!
//! - [`rng`]: xorshift32 generator picking each next piece
//! - [`pieces`]: 4x4 bitmask catalog and the fixed kick list
//! - [`field`]: 10x22 occupancy grid with collision and row clearing
//! - [`input`]: per-tick button sampling and edge detection
//! - [`piece`]: current/next piece, movement, rotation, spawning
//! - [`timing`]: frame-counted gravity and lock delay
//! - [`scoring`]: line awards, levels and the high score
//! - [`store`]: persistence and clock interfaces, high-score codec
//! - [`snapshot`]: read-only view for renderers
//! - [`session`]: the per-game aggregate tying everything together
//!
//! # Example
//!
//! ```
//! use tetris96_core::{ButtonState, FixedClock, GameSession, MemoryStore};
//! use tetris96_core::types::{Button, PieceKind, Rules};
//!
//! let mut game = GameSession::new(1, Rules::default(), MemoryStore::new(), FixedClock(0));
//! assert_eq!(game.current().kind, PieceKind::O);
//!
//! game.tick(&ButtonState::from_buttons(&[Button::MoveLeft]));
//! game.tick(&ButtonState::from_buttons(&[Button::HardDrop]));
//!
//! assert!(game.score() > 0); // hard drop awards points
//! assert_eq!(game.current().kind, PieceKind::S);
//! ```

pub mod field;
pub mod input;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod timing;

pub use tetris96_types as types;

// Re-export commonly used types for convenience
pub use field::Field;
pub use input::{ButtonSource, ButtonState, InputEdgeDetector};
pub use piece::{ActivePiece, PieceController};
pub use pieces::{footprint, is_filled, try_rotate, Footprint, KICK_OFFSETS};
pub use rng::Xorshift32;
pub use scoring::{level_for_lines, line_award, ScoreKeeper};
pub use session::{GameSession, SessionState};
pub use snapshot::{ActiveSnapshot, GameSnapshot, SnapshotGrid};
pub use store::{Clock, FixedClock, MemoryStore, ScoreStore};
pub use timing::{FallPhase, TimingController, TimingOutcome};
