//! Traits for the external collaborators of the control loop.
//!
//! The firmware treats all of these as infallible sinks/sources (there is
//! no error channel to report into on this device), which keeps the
//! control logic free of error plumbing and lets host tests substitute
//! simple recording fakes.
//!
//! Digital I/O is deliberately *not* wrapped here: buttons and LEDs use
//! `embedded_hal::digital` traits directly, and blocking waits use
//! `embedded_hal::delay::DelayNs`.

use crate::keys::VirtualKey;

/// Monotonic millisecond clock.
///
/// All debounce and mode-transition timing compares values from this
/// single clock; it must never go backwards during uptime.
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

/// USB HID transport, seen by the control loop as an event sink.
pub trait HidSink {
    /// Press (and hold) a virtual modifier key.
    fn press(&mut self, key: VirtualKey);

    /// Type an ASCII character while the pressed modifiers are held.
    fn write(&mut self, ch: u8);

    /// Release every held key and modifier.
    fn release_all(&mut self);
}

/// Persistent single-byte key-value storage (EEPROM-like).
pub trait ByteStore {
    fn read(&mut self, addr: u32) -> u8;
    fn write(&mut self, addr: u32, value: u8);
}

/// Diagnostic text sink, only driven while the device is in program mode.
pub trait DiagnosticSink {
    fn line(&mut self, args: core::fmt::Arguments<'_>);
}
