//! Terminal input.
//!
//! This crate is independent of any UI framework beyond `crossterm` events.
//! It maps key events to logical [`Button`](crate::types::Button)s and keeps a
//! held-state [`KeyboardPad`] that the session samples as its button source
//! (including on terminals without key-release events).

pub mod map;
pub mod pad;

pub use tetris96_core as core;
pub use tetris96_types as types;

pub use map::{button_for_key, should_quit};
pub use pad::KeyboardPad;
