//! Blocking LED feedback patterns.
//!
//! These intentionally stall the whole control loop: the feedback
//! duration is part of the user-visible contract and the device has no
//! other work to interleave. Every pattern leaves all lights off.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{ACK_BLINK_COUNT, BLINK_INTERVAL_MS, BUTTON_COUNT};
use crate::scanner::ButtonSet;

/// Blink one button's light `times` on/off pulses of `interval_ms` each.
pub fn blink<I, O, D>(
    buttons: &mut ButtonSet<I, O>,
    delay: &mut D,
    index: usize,
    times: u8,
    interval_ms: u32,
) where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    for _ in 0..times {
        buttons.led_on(index);
        delay.delay_ms(interval_ms);
        buttons.led_off(index);
        delay.delay_ms(interval_ms);
    }
}

/// Blink all five lights simultaneously.
pub fn blink_all<I, O, D>(buttons: &mut ButtonSet<I, O>, delay: &mut D, times: u8, interval_ms: u32)
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    for _ in 0..times {
        buttons.all_leds_on();
        delay.delay_ms(interval_ms);
        buttons.all_leds_off();
        delay.delay_ms(interval_ms);
    }
}

/// Blink each button once in index order, `times` passes.
pub fn run_all<I, O, D>(buttons: &mut ButtonSet<I, O>, delay: &mut D, times: u8, interval_ms: u32)
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    for _ in 0..times {
        for index in 0..BUTTON_COUNT {
            blink(buttons, delay, index, 1, interval_ms);
        }
    }
}

/// The boot light show: five sequential sweeps, then five flashes of
/// all lights. Also replayed as feedback when leaving configuration mode.
pub fn startup_show<I, O, D>(buttons: &mut ButtonSet<I, O>, delay: &mut D)
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    for _ in 0..5 {
        run_all(buttons, delay, 1, BLINK_INTERVAL_MS);
    }
    blink_all(buttons, delay, ACK_BLINK_COUNT, BLINK_INTERVAL_MS);
}
