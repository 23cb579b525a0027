//! Modifier selection and USB HID keyboard report (boot protocol).
//!
//! The device sends exactly one base character per button press, preceded
//! by the virtual modifier keys of the active [`Modifier`]. Report layout
//! (8 bytes):
//! ```text
//! Byte 0: Modifier keys (bitfield)
//!         Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!         Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!         Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!         Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1: Reserved (0x00)
//! Byte 2-7: Up to 6 simultaneous key codes (USB HID usage codes)
//! ```

use crate::config::BASE_KEY;

/// A virtual modifier key the HID sink can hold down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VirtualKey {
    Alt,
    Shift,
    Ctrl,
}

impl VirtualKey {
    /// Bit in byte 0 of the boot-protocol report (left-hand variants).
    pub fn modifier_bit(self) -> u8 {
        match self {
            VirtualKey::Ctrl => 0x01,
            VirtualKey::Shift => 0x02,
            VirtualKey::Alt => 0x04,
        }
    }
}

/// The configurable modifier applied before the base character.
///
/// Persisted as a single byte; any unrecognized byte decodes to
/// `Invalid`, which is kept distinct from the valid values rather than
/// silently collapsed (the device behaves as "no modifier" when asked
/// to emit with it).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    None,
    Alt,
    AltShift,
    AltCtrl,
    Invalid,
}

impl Modifier {
    /// Decode the persisted byte.
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => Modifier::None,
            1 => Modifier::Alt,
            2 => Modifier::AltShift,
            3 => Modifier::AltCtrl,
            _ => Modifier::Invalid,
        }
    }

    /// Encode for persistence. `Invalid` round-trips through byte 4.
    pub fn to_byte(self) -> u8 {
        match self {
            Modifier::None => 0,
            Modifier::Alt => 1,
            Modifier::AltShift => 2,
            Modifier::AltCtrl => 3,
            Modifier::Invalid => 4,
        }
    }

    /// Virtual keys to press before the base character, in press order.
    pub fn keys(self) -> &'static [VirtualKey] {
        match self {
            Modifier::Alt => &[VirtualKey::Alt],
            Modifier::AltShift => &[VirtualKey::Alt, VirtualKey::Shift],
            Modifier::AltCtrl => &[VirtualKey::Alt, VirtualKey::Ctrl],
            Modifier::None | Modifier::Invalid => &[],
        }
    }

    /// Human-readable name for program-mode diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Modifier::None => "none",
            Modifier::Alt => "alt",
            Modifier::AltShift => "alt+shift",
            Modifier::AltCtrl => "alt+ctrl",
            Modifier::Invalid => "invalid",
        }
    }
}

/// ASCII character emitted for a button, `'j'` + index ('j'..'n').
pub fn base_key(index: usize) -> u8 {
    BASE_KEY + index as u8
}

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 8;

/// Standard USB HID boot-protocol keyboard report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    /// Modifier key bitfield.
    pub modifier: u8,
    /// Reserved byte (always 0x00 per HID spec).
    pub reserved: u8,
    /// Up to 6 simultaneously pressed key codes.
    pub keycodes: [u8; 6],
}

impl KeyboardReport {
    /// Create an empty (all-keys-released) report.
    pub const fn empty() -> Self {
        Self {
            modifier: 0,
            reserved: 0,
            keycodes: [0; 6],
        }
    }

    /// Report carrying one key code under the given modifier bitfield.
    pub const fn single(modifier: u8, keycode: u8) -> Self {
        Self {
            modifier,
            reserved: 0,
            keycodes: [keycode, 0, 0, 0, 0, 0],
        }
    }

    /// Serialise into a byte slice for USB HID transmission.
    /// Returns the number of bytes written (always 8).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < KEYBOARD_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.modifier;
        buf[1] = self.reserved;
        buf[2..8].copy_from_slice(&self.keycodes);
        KEYBOARD_REPORT_SIZE
    }
}

/// Translate an ASCII letter into its USB HID usage code.
///
/// The device only ever types lowercase letters ('j'..'n'); anything
/// else maps to usage 0 (no event).
pub fn ascii_to_usage(ch: u8) -> u8 {
    match ch {
        b'a'..=b'z' => 0x04 + (ch - b'a'),
        _ => 0,
    }
}

// USB HID report descriptor for a boot-protocol keyboard

/// USB HID Report Descriptor for a standard keyboard.
///
/// This descriptor tells the USB host that we are a keyboard with:
///   - 8 modifier key bits (input)
///   - 1 reserved byte
///   - 6 key code bytes (input)
pub const KEYBOARD_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x06, // Usage (Keyboard)
    0xA1, 0x01, // Collection (Application)
    //
    //   - Modifier keys (8 bits) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0xE0, //   Usage Minimum (Left Control)
    0x29, 0xE7, //   Usage Maximum (Right GUI)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x08, //   Report Count (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    //   - Reserved byte -
    0x95, 0x01, //   Report Count (1)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x01, //   Input (Constant) - padding
    //
    //   - Key codes (6 bytes) -
    0x05, 0x07, //   Usage Page (Keyboard/Keypad)
    0x19, 0x00, //   Usage Minimum (0)
    0x29, 0xFF, //   Usage Maximum (255)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x06, //   Report Count (6)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x00, //   Input (Data, Array)
    //
    0xC0, // End Collection
];
