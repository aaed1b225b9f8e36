//! Timing controller - frame-counted gravity and lock delay
//!
//! Two states: `Falling` and `TouchingGround`. Gravity attempts a one-row
//! fall every `fall_interval` frames. A failed fall enters `TouchingGround`,
//! after which the lock-delay counter advances every frame until it exceeds
//! the threshold and the piece must be committed.

use crate::types::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallPhase {
    Falling,
    TouchingGround,
}

/// What a single timing step asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingOutcome {
    /// Nothing visible happened this frame.
    Idle,
    /// Gravity moved the piece down one row.
    Fell,
    /// Lock delay expired; commit the current piece.
    Lock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingController {
    fall_counter: u32,
    lock_delay: u32,
    touching_ground: bool,
}

impl TimingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FallPhase {
        if self.touching_ground {
            FallPhase::TouchingGround
        } else {
            FallPhase::Falling
        }
    }

    pub fn fall_counter(&self) -> u32 {
        self.fall_counter
    }

    pub fn lock_delay(&self) -> u32 {
        self.lock_delay
    }

    /// Advance one frame.
    ///
    /// `try_fall` is invoked at most once, when the gravity interval elapses,
    /// and must report whether the piece moved down.
    pub fn step(
        &mut self,
        rules: &Rules,
        level: u32,
        soft_drop: bool,
        try_fall: impl FnOnce() -> bool,
    ) -> TimingOutcome {
        let interval = rules.fall_interval(level, soft_drop);
        let mut outcome = TimingOutcome::Idle;

        self.fall_counter += 1;
        if self.fall_counter >= interval {
            self.fall_counter = 0;
            if try_fall() {
                self.touching_ground = false;
                self.lock_delay = 0;
                outcome = TimingOutcome::Fell;
            } else if !self.touching_ground {
                self.touching_ground = true;
                self.lock_delay = 0;
            }
        }

        if self.touching_ground {
            self.lock_delay += 1;
            if self.lock_delay > rules.lock_delay_frames {
                return TimingOutcome::Lock;
            }
        }

        outcome
    }

    /// Back to `Falling` with zeroed counters (after every commit).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
