//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! plain framebuffer of styled character cells and the renderer flushes that
//! framebuffer to the terminal.
//!
//! - Keeps `core` deterministic and free of I/O
//! - Allows precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris96_core as core;
pub use tetris96_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
