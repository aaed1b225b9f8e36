//! Scoring module - line awards, levels and the persisted high score
//!
//! Line clears award `LINE_AWARDS[n] * level`. Hard drops add a flat
//! per-cell bonus that is not level-scaled. The level is derived from total
//! lines: `1 + lines / LINES_PER_LEVEL`.

use tracing::{debug, warn};

use crate::store::{decode_high_score, encode_high_score, ScoreStore};
use crate::types::{HIGH_SCORE_KEY, LINES_PER_LEVEL, LINE_AWARDS};

/// Points for clearing `lines` rows at once on `level`.
///
/// Counts above four (only reachable with a pre-filled field) use the
/// four-line award.
pub fn line_award(lines: usize, level: u32) -> u32 {
    let base = LINE_AWARDS[lines.min(LINE_AWARDS.len() - 1)];
    base.saturating_mul(level)
}

/// Level reached after `lines` total cleared rows.
pub fn level_for_lines(lines: u32) -> u32 {
    1 + lines / LINES_PER_LEVEL
}

/// Running score, line count, level and high score of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
    lines: u32,
    level: u32,
    high_score: u32,
    high_score_dirty: bool,
}

impl ScoreKeeper {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            high_score,
            high_score_dirty: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the high score changed and has not been saved yet.
    pub fn high_score_dirty(&self) -> bool {
        self.high_score_dirty
    }

    /// Zero the run counters. The high score carries over.
    pub fn reset(&mut self) {
        *self = Self {
            high_score: self.high_score,
            high_score_dirty: self.high_score_dirty,
            ..Self::new(0)
        };
    }

    /// Credit a line clear. Returns the points awarded.
    pub fn award_lines(&mut self, cleared: usize) -> u32 {
        if cleared == 0 {
            return 0;
        }
        let points = line_award(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.level = level_for_lines(self.lines);
        self.bump_high_score();
        points
    }

    /// Credit flat bonus points (hard drop).
    pub fn add_bonus(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.bump_high_score();
    }

    fn bump_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.high_score_dirty = true;
        }
    }

    /// Save the high score if it changed since the last successful save.
    ///
    /// A failed save is logged and leaves the dirty flag set, so the next
    /// score change retries.
    pub fn persist_high_score(&mut self, store: &mut (impl ScoreStore + ?Sized)) {
        if !self.high_score_dirty {
            return;
        }
        match store.save(HIGH_SCORE_KEY, &encode_high_score(self.high_score)) {
            Ok(()) => {
                self.high_score_dirty = false;
                debug!(high_score = self.high_score, "high score saved");
            }
            Err(err) => {
                warn!(high_score = self.high_score, error = %err, "failed to save high score");
            }
        }
    }

    /// Read the stored high score, keeping the larger of it and the one in
    /// memory. An unreadable or short record counts as zero.
    pub fn load_high_score(&mut self, store: &mut (impl ScoreStore + ?Sized)) {
        let stored = read_high_score(store);
        if stored > self.high_score {
            self.high_score = stored;
        }
    }
}

impl Default for ScoreKeeper {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Stored high score, or zero when absent or unreadable.
pub fn read_high_score(store: &mut (impl ScoreStore + ?Sized)) -> u32 {
    match store.load(HIGH_SCORE_KEY) {
        Ok(Some(bytes)) => decode_high_score(&bytes).unwrap_or(0),
        Ok(None) => 0,
        Err(err) => {
            warn!(error = %err, "failed to load high score");
            0
        }
    }
}
