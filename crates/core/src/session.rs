//! Game session - the per-game aggregate and its tick loop
//!
//! A [`GameSession`] owns the field, the piece controller, timing, scoring and
//! input edge state, plus the host's store and clock. Everything mutates
//! through `&mut self`; nothing is global, so several sessions can coexist.
//!
//! Per tick the session samples port 0, advances the frame counter, handles
//! pause and restart edges, then (only while playing) dispatches movement,
//! rotation and hard drop before running gravity and lock delay.

use tracing::{debug, info};

use crate::field::Field;
use crate::input::{ButtonSource, ButtonState, InputEdgeDetector};
use crate::piece::{ActivePiece, PieceController};
use crate::scoring::{read_high_score, ScoreKeeper};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::store::{Clock, ScoreStore};
use crate::timing::{TimingController, TimingOutcome};
use crate::types::{Button, PieceKind, Rules};

/// Reported state of a session. `GameOver` wins over `Paused`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug)]
pub struct GameSession<S> {
    field: Field,
    pieces: PieceController,
    timing: TimingController,
    scores: ScoreKeeper,
    input: InputEdgeDetector,
    rules: Rules,
    seed: u32,
    frame: u64,
    paused: bool,
    game_over: bool,
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: ScoreStore> GameSession<S> {
    /// Start a game on an empty field.
    pub fn new(seed: u32, rules: Rules, store: S, clock: impl Clock + 'static) -> Self {
        Self::with_field(seed, rules, Field::new(), store, clock)
    }

    /// Start a game on a pre-filled field. If the first piece does not fit,
    /// the session starts in `GameOver`.
    pub fn with_field(
        seed: u32,
        rules: Rules,
        field: Field,
        mut store: S,
        clock: impl Clock + 'static,
    ) -> Self {
        let high_score = read_high_score(&mut store);
        let mut session = Self {
            field,
            pieces: PieceController::new(seed),
            timing: TimingController::new(),
            scores: ScoreKeeper::new(high_score),
            input: InputEdgeDetector::new(),
            rules,
            seed,
            frame: 0,
            paused: false,
            game_over: false,
            store,
            clock: Box::new(clock),
        };
        info!(seed, high_score, "session started");
        session.check_spawn();
        session
    }

    /// Reinitialize with a seed read from the clock.
    pub fn restart(&mut self) {
        // Only the low 32 bits of the clock matter for seeding.
        let seed = self.clock.millis() as u32;
        self.restart_with_seed(seed);
    }

    /// Reinitialize everything except the high score, which is reloaded from
    /// the store.
    pub fn restart_with_seed(&mut self, seed: u32) {
        self.field.clear();
        self.pieces.reset(seed);
        self.timing.reset();
        self.scores.reset();
        self.scores.load_high_score(&mut self.store);
        self.seed = seed;
        self.frame = 0;
        self.paused = false;
        self.game_over = false;
        self.input.sync();
        info!(seed, high_score = self.scores.high_score(), "session restarted");
        self.check_spawn();
    }

    /// Run one frame against the buttons held on port 0 of `source`.
    pub fn tick(&mut self, source: &(impl ButtonSource + ?Sized)) {
        self.input.update(ButtonState::sample(source, 0));
        self.frame += 1;

        if self.input.pressed(Button::Pause) {
            self.toggle_pause();
        }
        if self.input.pressed(Button::Restart) {
            self.restart();
            return;
        }
        if self.paused || self.game_over {
            return;
        }

        if self.input.pressed(Button::MoveLeft) {
            self.pieces.try_move(&self.field, -1, 0);
        }
        if self.input.pressed(Button::MoveRight) {
            self.pieces.try_move(&self.field, 1, 0);
        }
        if self.input.pressed(Button::RotateCw) {
            self.pieces.try_rotate(&self.field, true);
        }
        if self.input.pressed(Button::RotateCcw) {
            self.pieces.try_rotate(&self.field, false);
        }
        let soft_drop = self.input.down(Button::SoftDrop);

        if self.input.pressed(Button::HardDrop) {
            self.hard_drop();
            if self.game_over {
                return;
            }
        }

        let field = &self.field;
        let pieces = &mut self.pieces;
        let outcome = self
            .timing
            .step(&self.rules, self.scores.level(), soft_drop, || {
                pieces.try_move(field, 0, 1)
            });
        if outcome == TimingOutcome::Lock {
            self.commit();
        }
    }

    /// Apply one action immediately, outside the tick loop.
    ///
    /// Returns whether anything changed. Soft drop moves one row. Frame,
    /// gravity and edge state are untouched.
    pub fn apply(&mut self, button: Button) -> bool {
        match button {
            Button::Pause => {
                self.toggle_pause();
                return true;
            }
            Button::Restart => {
                self.restart();
                return true;
            }
            _ => {}
        }
        if self.paused || self.game_over {
            return false;
        }

        match button {
            Button::MoveLeft => self.pieces.try_move(&self.field, -1, 0),
            Button::MoveRight => self.pieces.try_move(&self.field, 1, 0),
            Button::SoftDrop => self.pieces.try_move(&self.field, 0, 1),
            Button::RotateCw => self.pieces.try_rotate(&self.field, true),
            Button::RotateCcw => self.pieces.try_rotate(&self.field, false),
            Button::HardDrop => {
                self.hard_drop();
                true
            }
            Button::Pause | Button::Restart => false,
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        debug!(paused = self.paused, frame = self.frame, "pause toggled");
    }

    fn hard_drop(&mut self) {
        let distance = self.pieces.drop_to_floor(&self.field);
        let bonus = u32::from(distance).saturating_mul(self.rules.hard_drop_points_per_cell);
        self.scores.add_bonus(bonus);
        self.scores.persist_high_score(&mut self.store);
        self.commit();
    }

    /// Lock the current piece, clear rows, score them and spawn the next one.
    fn commit(&mut self) {
        self.pieces.lock_into(&mut self.field);
        let cleared = self.field.clear_full_rows();
        if cleared > 0 {
            let points = self.scores.award_lines(cleared);
            debug!(
                cleared,
                points,
                score = self.scores.score(),
                level = self.scores.level(),
                "rows cleared"
            );
            self.scores.persist_high_score(&mut self.store);
        }

        if !self.pieces.spawn(&self.field) {
            self.enter_game_over();
        }
        self.timing.reset();
    }

    fn check_spawn(&mut self) {
        if !self.pieces.fits(&self.field) {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        info!(
            score = self.scores.score(),
            lines = self.scores.lines(),
            high_score = self.scores.high_score(),
            frame = self.frame,
            "game over"
        );
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_u8_grid(&mut out.field);
        out.active = if self.game_over {
            None
        } else {
            let piece = self.pieces.current();
            Some(ActiveSnapshot::new(piece, self.pieces.hard_drop_distance(&self.field)))
        };
        out.next = self.pieces.next();
        out.score = self.scores.score();
        out.lines = self.scores.lines();
        out.level = self.scores.level();
        out.high_score = self.scores.high_score();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.frame = self.frame;
        out.rng_state = self.pieces.rng_state();
    }

    pub fn state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> ActivePiece {
        self.pieces.current()
    }

    pub fn next(&self) -> PieceKind {
        self.pieces.next()
    }

    pub fn hard_drop_distance(&self) -> u8 {
        self.pieces.hard_drop_distance(&self.field)
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines()
    }

    pub fn level(&self) -> u32 {
        self.scores.level()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn high_score_dirty(&self) -> bool {
        self.scores.high_score_dirty()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seed of the current game.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn rng_state(&self) -> u32 {
        self.pieces.rng_state()
    }

    pub fn timing(&self) -> &TimingController {
        &self.timing
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
