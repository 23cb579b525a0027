//! A single buzzer button: debounced input line plus indicator LED.
//!
//! Buttons are wired active-low with internal pull-up; LEDs are
//! active-high. Pin errors are discarded (a failed read counts as
//! "released") since this device has no error channel to report into.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::DEBOUNCE_MS;

/// One physical push-button and its indicator light.
pub struct Button<I, O> {
    input: I,
    led: O,
    pressed: bool,
    /// Timestamp (ms) of the last accepted state change. 0 doubles as
    /// the "hold timer cleared" sentinel, see [`Button::clear_hold_timer`].
    last_change_ms: u64,
}

impl<I: InputPin, O: OutputPin> Button<I, O> {
    /// Create a button, seeding the stored state from the raw input level
    /// so a button held during power-up does not register as a fresh press.
    pub fn new(mut input: I, led: O) -> Self {
        let pressed = matches!(input.is_low(), Ok(true));
        Self {
            input,
            led,
            pressed,
            last_change_ms: 0,
        }
    }

    /// Poll the input line once and apply debouncing.
    ///
    /// A raw level that differs from the stored state is accepted only
    /// when at least [`DEBOUNCE_MS`] has passed since the last accepted
    /// change. Returns `true` only when the accepted transition is a press.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let raw_pressed = matches!(self.input.is_low(), Ok(true));
        if raw_pressed != self.pressed && now_ms.saturating_sub(self.last_change_ms) >= DEBOUNCE_MS
        {
            self.pressed = raw_pressed;
            self.last_change_ms = now_ms;
            return raw_pressed;
        }
        false
    }

    /// Debounced logical state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// How long the button has been continuously pressed, or `None` when
    /// released or when the hold timer has been cleared.
    pub fn held_for(&self, now_ms: u64) -> Option<u64> {
        if self.pressed && self.last_change_ms != 0 {
            Some(now_ms.saturating_sub(self.last_change_ms))
        } else {
            None
        }
    }

    /// Reset the last-change timestamp, cancelling any in-progress hold.
    /// The next accepted press edge restarts the timer.
    pub fn clear_hold_timer(&mut self) {
        self.last_change_ms = 0;
    }

    pub fn led_on(&mut self) {
        let _ = self.led.set_high();
    }

    pub fn led_off(&mut self) {
        let _ = self.led.set_low();
    }
}
