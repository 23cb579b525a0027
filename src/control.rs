//! The central control loop / mode state machine.
//!
//! One cooperative tick: refresh the activity LED, check the
//! configuration-entry timer, scan for a fresh press, dispatch it
//! according to the current mode. Single-threaded by contract; the
//! blocking feedback patterns stall the loop on purpose (spec'd
//! user-visible behavior, not a latency bug).
//!
//! The original device keeps program mode and configuration mode as two
//! independent flags: program mode is latched at boot (button A held at
//! power-up) and only suppresses key emission, while configuration mode
//! comes and goes at runtime. [`Mode`] is a derived view of the two.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::activity::activity_level;
use crate::config::{ACK_BLINK_COUNT, BLINK_INTERVAL_MS, CONFIG_HOLD_MS, KEY_HOLD_MS};
use crate::hal::{ByteStore, Clock, DiagnosticSink, HidSink};
use crate::keys::{base_key, Modifier};
use crate::lights;
use crate::scanner::{ButtonSet, BUTTON_A};
use crate::store::ModifierStore;

/// Derived operating mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Buttons emit keystrokes.
    Normal,
    /// On-device menu for changing the active modifier.
    Config,
    /// Boot-time diagnostic mode: presses are logged, never sent.
    Program,
}

/// Owns the buttons, the outputs, and the mode/modifier state, and
/// advances everything one tick at a time.
pub struct Controller<I, O, A, H, S, D, C, DL> {
    buttons: ButtonSet<I, O>,
    activity_led: A,
    hid: H,
    store: ModifierStore<S>,
    diag: D,
    clock: C,
    delay: DL,
    modifier: Modifier,
    /// Latched at boot, never leaves at runtime.
    program: bool,
    /// Runtime configuration-menu flag.
    config: bool,
}

impl<I, O, A, H, S, D, C, DL> Controller<I, O, A, H, S, D, C, DL>
where
    I: InputPin,
    O: OutputPin,
    A: OutputPin,
    H: HidSink,
    S: ByteStore,
    D: DiagnosticSink,
    C: Clock,
    DL: DelayNs,
{
    /// Build the controller and latch boot-time state: program mode if
    /// button A was held at power-up (its seeded raw level), and the
    /// persisted modifier.
    pub fn new(
        buttons: ButtonSet<I, O>,
        activity_led: A,
        hid: H,
        store: S,
        diag: D,
        clock: C,
        delay: DL,
    ) -> Self {
        let program = buttons.is_pressed(BUTTON_A);
        let mut store = ModifierStore::new(store);
        let modifier = store.load();
        Self {
            buttons,
            activity_led,
            hid,
            store,
            diag,
            clock,
            delay,
            modifier,
            program,
            config: false,
        }
    }

    /// One-time boot feedback: diagnostic banner (program mode only) and
    /// the startup light show.
    pub fn startup(&mut self) {
        if self.program {
            self.diag
                .line(format_args!("program mode: presses are logged, not sent"));
        }
        lights::startup_show(&mut self.buttons, &mut self.delay);
    }

    /// Run one cooperative loop iteration.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.refresh_activity(now);
        self.check_config_entry(now);
        if let Some(index) = self.buttons.scan(now) {
            self.dispatch(index);
        }
    }

    /// Derived mode view.
    pub fn mode(&self) -> Mode {
        if self.config {
            Mode::Config
        } else if self.program {
            Mode::Program
        } else {
            Mode::Normal
        }
    }

    /// The in-memory modifier (may differ from the persisted one while
    /// the configuration menu is open).
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    fn config_pending(&self, now_ms: u64) -> bool {
        !self.config && self.buttons.a_held_for(now_ms).is_some()
    }

    fn refresh_activity(&mut self, now_ms: u64) {
        if activity_level(self.config, self.config_pending(now_ms), now_ms) {
            let _ = self.activity_led.set_high();
        } else {
            let _ = self.activity_led.set_low();
        }
    }

    /// Enter configuration mode once button A has been held for the full
    /// threshold. Runs in program mode too: program mode suppresses key
    /// emission, not mode transitions.
    fn check_config_entry(&mut self, now_ms: u64) {
        if self.config {
            return;
        }
        if let Some(held) = self.buttons.a_held_for(now_ms) {
            if held >= CONFIG_HOLD_MS {
                lights::blink_all(
                    &mut self.buttons,
                    &mut self.delay,
                    ACK_BLINK_COUNT,
                    BLINK_INTERVAL_MS,
                );
                self.config = true;
            }
        }
    }

    fn dispatch(&mut self, index: usize) {
        if self.config {
            self.handle_config(index);
        } else if self.program {
            self.log_press(index);
        } else {
            self.emit_key(index);
        }
    }

    /// Configuration menu: B..E select a modifier (in memory only),
    /// anything else (button A) saves and leaves.
    fn handle_config(&mut self, index: usize) {
        let selected = match index {
            1 => Some(Modifier::Alt),
            2 => Some(Modifier::AltShift),
            3 => Some(Modifier::AltCtrl),
            4 => Some(Modifier::None),
            _ => None,
        };
        match selected {
            Some(modifier) => {
                self.modifier = modifier;
                lights::blink(
                    &mut self.buttons,
                    &mut self.delay,
                    index,
                    ACK_BLINK_COUNT,
                    BLINK_INTERVAL_MS,
                );
            }
            None => {
                self.store.save(self.modifier);
                lights::startup_show(&mut self.buttons, &mut self.delay);
                self.buttons.clear_a_hold_timer();
                self.config = false;
            }
        }
    }

    /// Program mode: describe the press on the diagnostic sink, never
    /// touch the HID transport.
    fn log_press(&mut self, index: usize) {
        self.diag.line(format_args!(
            "button {} modifier={} key={}",
            index,
            self.modifier.name(),
            base_key(index) as char,
        ));
    }

    /// Normal mode: flash the activity LED off, press the resolved
    /// modifier keys, type the base character, hold, release everything.
    fn emit_key(&mut self, index: usize) {
        let _ = self.activity_led.set_low();
        for &key in self.modifier.keys() {
            self.hid.press(key);
        }
        self.hid.write(base_key(index));
        self.delay.delay_ms(KEY_HOLD_MS);
        self.hid.release_all();
    }
}
