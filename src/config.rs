//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and key-mapping
//! constants live here so they can be tuned in one place.

// Buttons

/// Number of physical buzzer buttons (A..E).
pub const BUTTON_COUNT: usize = 5;

/// Button debounce window (ms). Raw-level transitions closer together
/// than this are ignored.
pub const DEBOUNCE_MS: u64 = 50;

/// How long button A must be held continuously before the device
/// enters configuration mode (ms).
pub const CONFIG_HOLD_MS: u64 = 5000;

// Keyboard output

/// Key-code origin: button index 0..4 maps to 'j'..'n'.
pub const BASE_KEY: u8 = b'j';

/// How long the key and modifiers are held down before release (ms).
pub const KEY_HOLD_MS: u32 = 100;

// LED feedback

/// On/off interval for all feedback blink patterns (ms).
pub const BLINK_INTERVAL_MS: u32 = 50;

/// Number of pulses for selection/entry acknowledgement blinks.
pub const ACK_BLINK_COUNT: u8 = 5;

/// Activity LED half-period while in configuration mode (ms).
pub const CONFIG_BLINK_HALF_MS: u64 = 100;

/// Activity LED half-period while button A is held, pre-entry (ms).
pub const PENDING_BLINK_HALF_MS: u64 = 500;

// Persistent storage

/// Address of the persisted modifier byte in the byte store.
pub const MODIFIER_ADDR: u32 = 0;

/// Flash page index where the modifier byte lives (4 KB per page on
/// nRF52840). The linker script keeps this page out of the program image.
pub const STORAGE_FLASH_PAGE_START: u32 = 255;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 1;

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "buzzerkbd";
pub const USB_PRODUCT: &str = "Buzzer Keyboard";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 10;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button A (input)   → P0.11     LED A → P0.13
//   Button B (input)   → P0.12     LED B → P0.14
//   Button C (input)   → P0.24     LED C → P0.15
//   Button D (input)   → P0.25     LED D → P0.16
//   Button E (input)   → P1.00     LED E → P1.01
//   Activity LED       → P0.06
