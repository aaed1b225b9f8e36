//! Input tests - keyboard pad feeding a live session

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use tetris96::core::{ButtonState, FixedClock, GameSession, InputEdgeDetector, MemoryStore};
use tetris96::input::{button_for_key, should_quit, KeyboardPad};
use tetris96::types::{Button, Rotation, Rules};

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    }
}

fn session() -> GameSession<MemoryStore> {
    GameSession::new(1, Rules::default(), MemoryStore::new(), FixedClock(0))
}

/// One host-loop iteration: expire, tick, drop latches.
fn host_tick(game: &mut GameSession<MemoryStore>, pad: &mut KeyboardPad, now: Instant) {
    pad.expire(now);
    game.tick(pad);
    pad.end_tick();
}

#[test]
fn test_quick_tap_between_ticks_moves_once() {
    let mut game = session();
    let mut pad = KeyboardPad::new();
    let now = Instant::now();
    let col = game.current().col;

    pad.handle_key_event(key(KeyCode::Char('a'), KeyEventKind::Press), now);
    pad.handle_key_event(key(KeyCode::Char('a'), KeyEventKind::Release), now);
    host_tick(&mut game, &mut pad, now);
    assert_eq!(game.current().col, col - 1);

    host_tick(&mut game, &mut pad, now);
    assert_eq!(game.current().col, col - 1);
}

#[test]
fn test_held_key_with_repeats_acts_on_the_first_tick_only() {
    let mut game = session();
    let mut pad = KeyboardPad::new();
    let start = Instant::now();
    let col = game.current().col;

    pad.handle_key_event(key(KeyCode::Right, KeyEventKind::Press), start);
    for i in 0..10u64 {
        let now = start + Duration::from_millis(16 * i);
        pad.handle_key_event(key(KeyCode::Right, KeyEventKind::Repeat), now);
        host_tick(&mut game, &mut pad, now);
    }
    assert_eq!(game.current().col, col + 1);

    pad.handle_key_event(key(KeyCode::Right, KeyEventKind::Release), start);
    host_tick(&mut game, &mut pad, start + Duration::from_millis(200));
    pad.handle_key_event(
        key(KeyCode::Right, KeyEventKind::Press),
        start + Duration::from_millis(220),
    );
    host_tick(&mut game, &mut pad, start + Duration::from_millis(220));
    assert_eq!(game.current().col, col + 2);
}

#[test]
fn test_missing_release_expires_and_allows_a_new_press() {
    let mut game = session();
    let mut pad = KeyboardPad::new();
    let start = Instant::now();

    pad.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), start);
    host_tick(&mut game, &mut pad, start);
    assert_eq!(game.current().rotation, Rotation::East);

    // No release ever arrives; the timeout lets go of the key.
    let later = start + pad.key_release_timeout() + Duration::from_millis(1);
    host_tick(&mut game, &mut pad, later);
    assert!(!pad.is_held(Button::RotateCw));

    pad.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), later);
    host_tick(&mut game, &mut pad, later);
    assert_eq!(game.current().rotation, Rotation::South);
}

#[test]
fn test_focus_loss_clears_held_buttons() {
    let mut pad = KeyboardPad::new();
    let now = Instant::now();
    pad.handle_key_event(key(KeyCode::Down, KeyEventKind::Press), now);
    pad.handle_key_event(key(KeyCode::Char(' '), KeyEventKind::Press), now);
    assert!(!ButtonState::sample(&pad, 0).is_empty());

    pad.clear();
    assert!(ButtonState::sample(&pad, 0).is_empty());
}

#[test]
fn test_key_map_covers_every_button() {
    let keys = [
        (KeyCode::Left, Button::MoveLeft),
        (KeyCode::Right, Button::MoveRight),
        (KeyCode::Down, Button::SoftDrop),
        (KeyCode::Up, Button::RotateCw),
        (KeyCode::Char('z'), Button::RotateCcw),
        (KeyCode::Char(' '), Button::HardDrop),
        (KeyCode::Char('p'), Button::Pause),
        (KeyCode::Char('r'), Button::Restart),
    ];
    for (code, button) in keys {
        assert_eq!(button_for_key(code), Some(button), "{:?}", code);
    }
    assert_eq!(button_for_key(KeyCode::Enter), None);
    assert!(should_quit(key(KeyCode::Char('q'), KeyEventKind::Press)));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(key(KeyCode::Char('c'), KeyEventKind::Press)));
}

#[test]
fn test_edge_detector_reports_press_once() {
    let mut edges = InputEdgeDetector::new();
    let left = ButtonState::from_buttons(&[Button::MoveLeft]);

    edges.update(left);
    assert!(edges.pressed(Button::MoveLeft));
    assert!(edges.down(Button::MoveLeft));

    edges.update(left);
    assert!(!edges.pressed(Button::MoveLeft));
    assert!(edges.down(Button::MoveLeft));

    edges.update(ButtonState::empty());
    assert!(!edges.down(Button::MoveLeft));
    edges.update(left);
    assert!(edges.pressed(Button::MoveLeft));
}

#[test]
fn test_sync_suppresses_held_buttons() {
    let mut edges = InputEdgeDetector::new();
    let drop = ButtonState::from_buttons(&[Button::HardDrop]);
    edges.update(drop);
    assert!(edges.pressed(Button::HardDrop));
    edges.sync();
    assert!(!edges.pressed(Button::HardDrop));
    assert!(edges.down(Button::HardDrop));
}
