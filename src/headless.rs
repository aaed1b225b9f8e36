//! Headless runner: drive a session without a terminal and report the result
//! as JSON.

use serde::Serialize;

use crate::core::{ButtonSource, ButtonState, GameSession, GameSnapshot, ScoreStore, SnapshotGrid};
use crate::types::{FIELD_COLS, FIELD_ROWS, HIDDEN_ROWS};

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMessage {
    pub seed: u32,
    pub frame: u64,
    pub playable: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub high_score: u32,
    pub rng_state: u32,
    pub next: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveMessage>,
    pub board: BoardMessage,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActiveMessage {
    pub kind: &'static str,
    pub rotation: &'static str,
    pub col: i8,
    pub row: i8,
    pub ghost_row: i8,
}

/// Occupancy grid: `0` empty, piece id + 1 filled. Row 0 is the top of the
/// hidden buffer.
#[derive(Debug, Clone, Serialize)]
pub struct BoardMessage {
    pub width: u8,
    pub height: u8,
    pub hidden_rows: u8,
    pub cells: SnapshotGrid,
}

impl SnapshotMessage {
    pub fn new(snap: &GameSnapshot, seed: u32) -> Self {
        Self {
            seed,
            frame: snap.frame,
            playable: snap.playable(),
            paused: snap.paused,
            game_over: snap.game_over,
            score: snap.score,
            lines: snap.lines,
            level: snap.level,
            high_score: snap.high_score,
            rng_state: snap.rng_state,
            next: snap.next.as_str(),
            active: snap.active.map(|a| ActiveMessage {
                kind: a.kind.as_str(),
                rotation: a.rotation.as_str(),
                col: a.col,
                row: a.row,
                ghost_row: a.ghost_row(),
            }),
            board: BoardMessage {
                width: FIELD_COLS,
                height: FIELD_ROWS,
                hidden_rows: HIDDEN_ROWS,
                cells: snap.field,
            },
        }
    }
}

/// Tick `session` up to `ticks` times with the buttons from `input`, stopping
/// early once the game is over. Returns the number of ticks run.
pub fn run<S: ScoreStore>(
    session: &mut GameSession<S>,
    ticks: u64,
    input: &(impl ButtonSource + ?Sized),
) -> u64 {
    let mut ran = 0;
    while ran < ticks && !session.is_game_over() {
        session.tick(input);
        ran += 1;
    }
    ran
}

/// Run with no buttons held.
pub fn run_idle<S: ScoreStore>(session: &mut GameSession<S>, ticks: u64) -> u64 {
    run(session, ticks, &ButtonState::empty())
}
