//! Shared-handle test doubles for driving the control loop on the host.
//!
//! Clock and delay share one timeline so blocking feedback patterns
//! advance time exactly the way the firmware experiences it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use buzzerkbd::button::Button;
use buzzerkbd::hal::{ByteStore, Clock, DiagnosticSink, HidSink};
use buzzerkbd::keys::VirtualKey;
use buzzerkbd::scanner::ButtonSet;
use buzzerkbd::Controller;

/// Shared electrical level of one GPIO line.
#[derive(Clone)]
pub struct Line(Rc<Cell<bool>>);

impl Line {
    pub fn high() -> Self {
        Line(Rc::new(Cell::new(true)))
    }

    pub fn low() -> Self {
        Line(Rc::new(Cell::new(false)))
    }

    /// Drive the raw level; for button lines, low means pressed.
    pub fn drive(&self, high: bool) {
        self.0.set(high);
    }

    pub fn is_high(&self) -> bool {
        self.0.get()
    }
}

pub struct FakeInput(Line);

impl ErrorType for FakeInput {
    type Error = core::convert::Infallible;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.is_high())
    }
}

pub struct FakeOutput(Line);

impl ErrorType for FakeOutput {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.drive(true);
        Ok(())
    }
}

/// Monotonic test timeline, in nanoseconds for exact blocking delays.
#[derive(Clone)]
pub struct TestClock(Rc<Cell<u64>>);

impl TestClock {
    pub fn new() -> Self {
        TestClock(Rc::new(Cell::new(0)))
    }

    /// Jump to an absolute millisecond timestamp (never backwards).
    pub fn set_ms(&self, ms: u64) {
        assert!(ms * 1_000_000 >= self.0.get(), "clock must be monotonic");
        self.0.set(ms * 1_000_000);
    }

    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }
}

impl Clock for TestClock {
    fn now_ms(&mut self) -> u64 {
        self.0.get() / 1_000_000
    }
}

/// Blocking delay that advances the shared timeline.
pub struct TestDelay(pub TestClock);

impl DelayNs for TestDelay {
    fn delay_ns(&mut self, ns: u32) {
        let t = &self.0 .0;
        t.set(t.get() + ns as u64);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HidEvent {
    Press(VirtualKey),
    Write(u8),
    ReleaseAll,
}

/// Recording HID sink.
#[derive(Clone)]
pub struct TestHid(Rc<RefCell<Vec<HidEvent>>>);

impl TestHid {
    pub fn new() -> Self {
        TestHid(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn events(&self) -> Vec<HidEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl HidSink for TestHid {
    fn press(&mut self, key: VirtualKey) {
        self.0.borrow_mut().push(HidEvent::Press(key));
    }

    fn write(&mut self, ch: u8) {
        self.0.borrow_mut().push(HidEvent::Write(ch));
    }

    fn release_all(&mut self) {
        self.0.borrow_mut().push(HidEvent::ReleaseAll);
    }
}

/// Recording diagnostic sink.
#[derive(Clone)]
pub struct TestDiag(Rc<RefCell<Vec<String>>>);

impl TestDiag {
    pub fn new() -> Self {
        TestDiag(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl DiagnosticSink for TestDiag {
    fn line(&mut self, args: core::fmt::Arguments<'_>) {
        self.0.borrow_mut().push(std::fmt::format(args));
    }
}

/// One-byte persistent store with an inspectable shared cell.
#[derive(Clone)]
pub struct TestStore {
    byte: Rc<Cell<u8>>,
    writes: Rc<Cell<usize>>,
}

impl TestStore {
    /// 0xFF mimics erased flash.
    pub fn new(initial: u8) -> Self {
        TestStore {
            byte: Rc::new(Cell::new(initial)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn byte(&self) -> u8 {
        self.byte.get()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl ByteStore for TestStore {
    fn read(&mut self, _addr: u32) -> u8 {
        self.byte.get()
    }

    fn write(&mut self, _addr: u32, value: u8) {
        self.byte.set(value);
        self.writes.set(self.writes.get() + 1);
    }
}

pub type TestController = Controller<
    FakeInput,
    FakeOutput,
    FakeOutput,
    TestHid,
    TestStore,
    TestDiag,
    TestClock,
    TestDelay,
>;

/// Fully wired device under test.
pub struct Rig {
    /// Raw button line levels, A=0 … E=4 (drive low to press).
    pub inputs: Vec<Line>,
    pub leds: Vec<Line>,
    pub activity: Line,
    pub clock: TestClock,
    pub hid: TestHid,
    pub diag: TestDiag,
    pub store: TestStore,
    pub ctl: TestController,
}

impl Rig {
    /// Power up with a persisted modifier byte and optionally button A
    /// already held (selects program mode).
    pub fn new(stored_byte: u8, a_held_at_boot: bool) -> Self {
        let mut inputs = Vec::new();
        let mut leds = Vec::new();
        let mut buttons = Vec::new();
        for i in 0..5 {
            let input = if i == 0 && a_held_at_boot {
                Line::low()
            } else {
                Line::high()
            };
            let led = Line::low();
            buttons.push(Button::new(
                FakeInput(input.clone()),
                FakeOutput(led.clone()),
            ));
            inputs.push(input);
            leds.push(led);
        }
        let set = ButtonSet::new(buttons.try_into().unwrap_or_else(|_| unreachable!()));

        let activity = Line::low();
        let clock = TestClock::new();
        let hid = TestHid::new();
        let diag = TestDiag::new();
        let store = TestStore::new(stored_byte);

        let ctl = Controller::new(
            set,
            FakeOutput(activity.clone()),
            hid.clone(),
            store.clone(),
            diag.clone(),
            clock.clone(),
            TestDelay(clock.clone()),
        );

        Rig {
            inputs,
            leds,
            activity,
            clock,
            hid,
            diag,
            store,
            ctl,
        }
    }

    /// Drive a button line low and run one tick at the given time.
    pub fn press_at(&mut self, index: usize, ms: u64) {
        self.inputs[index].drive(false);
        self.tick_at(ms);
    }

    /// Release a button line and run one tick at the given time.
    pub fn release_at(&mut self, index: usize, ms: u64) {
        self.inputs[index].drive(true);
        self.tick_at(ms);
    }

    pub fn tick_at(&mut self, ms: u64) {
        self.clock.set_ms(ms);
        self.ctl.tick();
    }
}
