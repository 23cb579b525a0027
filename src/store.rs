//! Load/save of the active modifier from persistent storage.
//!
//! Single-byte scope: no versioning, no checksum. An unrecognized byte
//! (fresh device, erased flash) loads as [`Modifier::Invalid`] instead
//! of failing.

use crate::config::MODIFIER_ADDR;
use crate::hal::ByteStore;
use crate::keys::Modifier;

/// Persistent home of the active [`Modifier`].
pub struct ModifierStore<S> {
    store: S,
}

impl<S: ByteStore> ModifierStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted modifier; unknown bytes map to `Invalid`.
    pub fn load(&mut self) -> Modifier {
        Modifier::from_byte(self.store.read(MODIFIER_ADDR))
    }

    /// Persist the modifier. Only called when leaving configuration mode,
    /// so selection changes inside the menu cost no flash writes.
    pub fn save(&mut self, modifier: Modifier) {
        self.store.write(MODIFIER_ADDR, modifier.to_byte());
    }
}
