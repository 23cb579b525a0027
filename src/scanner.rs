//! Input scanner over the fixed set of five buttons.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::button::Button;
use crate::config::BUTTON_COUNT;

/// Index of button A, the configuration-mode button.
pub const BUTTON_A: usize = 0;

/// The five buzzer buttons, A=0 … E=4, created once at startup.
pub struct ButtonSet<I, O> {
    buttons: [Button<I, O>; BUTTON_COUNT],
}

impl<I: InputPin, O: OutputPin> ButtonSet<I, O> {
    pub fn new(buttons: [Button<I, O>; BUTTON_COUNT]) -> Self {
        Self { buttons }
    }

    /// Poll every button once and report at most one fresh press.
    ///
    /// All indicator LEDs are cleared first, then buttons are polled in
    /// index order; the first accepted press lights its LED and ends the
    /// scan, so lower-index buttons win within one tick.
    pub fn scan(&mut self, now_ms: u64) -> Option<usize> {
        self.all_leds_off();
        for (i, button) in self.buttons.iter_mut().enumerate() {
            if button.poll(now_ms) {
                button.led_on();
                return Some(i);
            }
        }
        None
    }

    /// Debounced state of one button.
    pub fn is_pressed(&self, index: usize) -> bool {
        self.buttons[index].is_pressed()
    }

    /// Continuous hold duration of button A (configuration entry timing).
    pub fn a_held_for(&self, now_ms: u64) -> Option<u64> {
        self.buttons[BUTTON_A].held_for(now_ms)
    }

    /// Cancel button A's in-progress hold (on leaving configuration mode).
    pub fn clear_a_hold_timer(&mut self) {
        self.buttons[BUTTON_A].clear_hold_timer();
    }

    pub fn led_on(&mut self, index: usize) {
        self.buttons[index].led_on();
    }

    pub fn led_off(&mut self, index: usize) {
        self.buttons[index].led_off();
    }

    pub fn all_leds_on(&mut self) {
        for button in &mut self.buttons {
            button.led_on();
        }
    }

    pub fn all_leds_off(&mut self) {
        for button in &mut self.buttons {
            button.led_off();
        }
    }
}
