//! tetris96 (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `tetris96::{core,input,term,types}` and adds the host-side pieces the
//! binary needs: a directory-backed score store, a system clock and the
//! headless runner.

pub mod headless;
pub mod storage;

pub use tetris96_core as core;
pub use tetris96_input as input;
pub use tetris96_term as term;
pub use tetris96_types as types;

pub use storage::{DirStore, SystemClock};
