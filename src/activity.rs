//! Activity LED level as a pure function of mode and elapsed time.
//!
//! The control loop decides when to apply the result; this computation
//! itself is idempotent and side-effect-free so it can be tested on the
//! host.

use crate::config::{CONFIG_BLINK_HALF_MS, PENDING_BLINK_HALF_MS};

/// Whether the activity LED should be lit right now.
///
/// - Configuration mode: fast blink, 100 ms half-period.
/// - Button A held pre-entry (`config_pending`): slow blink, 500 ms.
/// - Otherwise: solid on. (The control loop separately forces the LED
///   off for the duration of key dispatch as a "sent" flash.)
pub fn activity_level(config_mode: bool, config_pending: bool, now_ms: u64) -> bool {
    if config_mode {
        (now_ms / CONFIG_BLINK_HALF_MS) % 2 == 0
    } else if config_pending {
        (now_ms / PENDING_BLINK_HALF_MS) % 2 == 0
    } else {
        true
    }
}
