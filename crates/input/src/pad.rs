//! Keyboard pad: held-button state built from terminal key events.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a button counts as held until its release arrives or until no press or
//! repeat for it has been seen for the timeout. Terminal auto-repeat keeps
//! refreshing the press time, so a physically held key stays held.
//!
//! A press that is released before the next tick samples the pad is latched
//! until [`KeyboardPad::end_tick`], so quick taps are never lost.

use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::{ButtonSource, ButtonState};
use crate::map::button_for_key;
use crate::types::Button;

// Long enough to bridge the delay before terminal auto-repeat kicks in.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct KeyboardPad {
    last_press: [Option<Instant>; Button::COUNT],
    latched: ButtonState,
    release_timeout: Duration,
}

impl KeyboardPad {
    pub fn new() -> Self {
        Self {
            last_press: [None; Button::COUNT],
            latched: ButtonState::empty(),
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.release_timeout
    }

    /// Feed one terminal key event. Returns the mapped button, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> Option<Button> {
        let button = button_for_key(key.code)?;
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(button, now),
            KeyEventKind::Release => self.release(button),
        }
        Some(button)
    }

    pub fn press(&mut self, button: Button, now: Instant) {
        self.last_press[button.index()] = Some(now);
        self.latched.set(button, true);
    }

    pub fn release(&mut self, button: Button) {
        self.last_press[button.index()] = None;
    }

    /// Release every button whose last press is older than the timeout.
    pub fn expire(&mut self, now: Instant) {
        for slot in self.last_press.iter_mut() {
            if let Some(pressed_at) = *slot {
                if now.saturating_duration_since(pressed_at) > self.release_timeout {
                    *slot = None;
                }
            }
        }
    }

    /// Drop latched taps once a tick has sampled them.
    pub fn end_tick(&mut self) {
        self.latched = ButtonState::empty();
    }

    pub fn is_held(&self, button: Button) -> bool {
        self.last_press[button.index()].is_some()
    }

    /// Release everything, e.g. when the terminal loses focus.
    pub fn clear(&mut self) {
        self.last_press = [None; Button::COUNT];
        self.latched = ButtonState::empty();
    }
}

impl Default for KeyboardPad {
    fn default() -> Self {
        Self::new()
    }
}

/// The keyboard is player one.
impl ButtonSource for KeyboardPad {
    fn button_down(&self, port: u32, button: Button) -> bool {
        port == 0 && (self.is_held(button) || self.latched.is_down(button))
    }
}
