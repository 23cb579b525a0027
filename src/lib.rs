//! Host-testable library interface for buzzerkbd.
//!
//! All control logic lives here, generic over hardware traits
//! (`embedded-hal` pins and delay, plus the collaborator traits in
//! [`hal`]), so it can be tested on the host without embedded hardware.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! behind the `embedded` feature; it wires these modules to the nRF52840
//! via Embassy.

#![cfg_attr(not(test), no_std)]

pub mod activity;
pub mod button;
pub mod config;
pub mod control;
pub mod hal;
pub mod keys;
pub mod lights;
pub mod scanner;
pub mod store;

pub use control::{Controller, Mode};
pub use keys::{Modifier, VirtualKey};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
