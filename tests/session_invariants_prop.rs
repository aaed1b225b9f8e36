//! Property tests for the session tick.
//!
//! Random seeds and random held-button streams drive full rollouts. Along
//! the way:
//! - score and cleared lines never decrease,
//! - level always equals `1 + lines / 10`,
//! - the high score never trails the score,
//! - the active piece never overlaps the field while play continues,
//! - identical seeds and inputs give identical sessions.

use proptest::prelude::*;
use tetris96::core::{ButtonState, FixedClock, GameSession, MemoryStore};
use tetris96::types::{Button, Rules};

// Pause and restart are left out so rollouts keep playing.
const PLAY_BUTTONS: [Button; 6] = [
    Button::MoveLeft,
    Button::MoveRight,
    Button::SoftDrop,
    Button::HardDrop,
    Button::RotateCw,
    Button::RotateCcw,
];

fn buttons_from_bits(bits: u8) -> ButtonState {
    let mut state = ButtonState::empty();
    for (i, button) in PLAY_BUTTONS.iter().enumerate() {
        state.set(*button, bits & (1 << i) != 0);
    }
    state
}

fn session(seed: u32) -> GameSession<MemoryStore> {
    GameSession::new(seed, Rules::default(), MemoryStore::new(), FixedClock(0))
}

proptest! {
    #[test]
    fn rollout_respects_session_invariants(
        seed in any::<u32>(),
        inputs in prop::collection::vec(any::<u8>(), 1..600),
    ) {
        let mut game = session(seed);

        for (i, bits) in inputs.iter().enumerate() {
            let score = game.score();
            let lines = game.lines();

            game.tick(&buttons_from_bits(*bits));

            prop_assert_eq!(game.frame(), i as u64 + 1);
            prop_assert!(game.score() >= score);
            prop_assert!(game.lines() >= lines);
            prop_assert_eq!(game.level(), 1 + game.lines() / 10);
            prop_assert!(game.high_score() >= game.score());

            if game.is_game_over() {
                prop_assert!(game.snapshot().active.is_none());
                break;
            }
            prop_assert!(!game.current().collides(game.field()));

            let snap = game.snapshot();
            for row in snap.field.iter() {
                prop_assert!(row.iter().all(|&v| v <= 7));
            }
        }
    }

    #[test]
    fn same_seed_and_inputs_replay_identically(
        seed in any::<u32>(),
        inputs in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut a = session(seed);
        let mut b = session(seed);
        for bits in &inputs {
            a.tick(&buttons_from_bits(*bits));
            b.tick(&buttons_from_bits(*bits));
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
        prop_assert_eq!(a.field(), b.field());
    }

    #[test]
    fn idle_session_never_clears_or_scores(seed in any::<u32>(), ticks in 1u64..2_000) {
        let mut game = session(seed);
        tetris96::headless::run_idle(&mut game, ticks);
        prop_assert_eq!(game.score(), 0);
        prop_assert_eq!(game.lines(), 0);
        prop_assert_eq!(game.level(), 1);
    }
}
