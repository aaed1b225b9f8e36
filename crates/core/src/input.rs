//! Input module - per-tick button sampling and edge detection
//!
//! Hosts expose raw button state through [`ButtonSource`]. The session samples
//! it once per tick into a [`ButtonState`] and feeds that to the
//! [`InputEdgeDetector`], which keeps the previous and current sample for every
//! logical button.

use crate::types::Button;

/// Raw per-port button query implemented by hosts.
pub trait ButtonSource {
    /// Whether `button` is currently held on `port`.
    fn button_down(&self, port: u32, button: Button) -> bool;
}

/// One sample of all logical buttons, packed as a bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonState {
    bits: u16,
}

impl ButtonState {
    /// No buttons held.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// State with exactly the given buttons held.
    pub fn from_buttons(buttons: &[Button]) -> Self {
        let mut state = Self::empty();
        for &button in buttons {
            state.set(button, true);
        }
        state
    }

    /// Sample every logical button of `port` from a source.
    pub fn sample(source: &(impl ButtonSource + ?Sized), port: u32) -> Self {
        let mut state = Self::empty();
        for button in Button::ALL {
            state.set(button, source.button_down(port, button));
        }
        state
    }

    pub fn set(&mut self, button: Button, down: bool) {
        let mask = 1u16 << button.index();
        if down {
            self.bits |= mask;
        } else {
            self.bits &= !mask;
        }
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.bits & (1u16 << button.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// A literal button state answers for port 0 only.
impl ButtonSource for ButtonState {
    fn button_down(&self, port: u32, button: Button) -> bool {
        port == 0 && self.is_down(button)
    }
}

/// Previous/current sample pair giving edge and level queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEdgeDetector {
    previous: ButtonState,
    current: ButtonState,
}

impl InputEdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift in this tick's sample.
    pub fn update(&mut self, now: ButtonState) {
        self.previous = self.current;
        self.current = now;
    }

    /// Held now and not held on the previous sample.
    pub fn pressed(&self, button: Button) -> bool {
        self.current.is_down(button) && !self.previous.is_down(button)
    }

    /// Held now, regardless of history.
    pub fn down(&self, button: Button) -> bool {
        self.current.is_down(button)
    }

    /// Treat everything currently held as already seen, so buttons held
    /// through a reset do not fire again.
    pub fn sync(&mut self) {
        self.previous = self.current;
    }

    pub fn current(&self) -> ButtonState {
        self.current
    }
}
