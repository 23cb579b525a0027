//! Embedded entry point: buzzerkbd on nRF52840.
//!
//! Wires the host-testable control logic to real hardware: GPIO buttons
//! and LEDs, the Embassy USB HID keyboard endpoint, NVMC flash for the
//! persisted modifier, defmt for program-mode diagnostics.
//!
//! The control loop itself is blocking by contract (feedback patterns
//! stall it on purpose); it runs in the main task while the USB stack
//! runs in its own tasks.

#![no_std]
#![no_main]

mod board;

use buzzerkbd::button::Button;
use buzzerkbd::scanner::ButtonSet;
use buzzerkbd::Controller;
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_time::Timer;
use panic_probe as _;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("buzzerkbd starting");

    let usb = board::usb::init(p.USBD);
    spawner.must_spawn(board::usb::usb_task(usb.device));
    spawner.must_spawn(board::usb::hid_writer_task(usb.keyboard_writer));

    // Pin assignment documented in src/config.rs.
    let buttons = ButtonSet::new([
        Button::new(
            Input::new(p.P0_11, Pull::Up),
            Output::new(p.P0_13, Level::Low, OutputDrive::Standard),
        ),
        Button::new(
            Input::new(p.P0_12, Pull::Up),
            Output::new(p.P0_14, Level::Low, OutputDrive::Standard),
        ),
        Button::new(
            Input::new(p.P0_24, Pull::Up),
            Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
        ),
        Button::new(
            Input::new(p.P0_25, Pull::Up),
            Output::new(p.P0_16, Level::Low, OutputDrive::Standard),
        ),
        Button::new(
            Input::new(p.P1_00, Pull::Up),
            Output::new(p.P1_01, Level::Low, OutputDrive::Standard),
        ),
    ]);
    let activity_led = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);

    let mut controller = Controller::new(
        buttons,
        activity_led,
        board::usb::UsbHidSink::new(),
        board::FlashStore::new(p.NVMC),
        board::DefmtDiag,
        board::UptimeClock,
        embassy_time::Delay,
    );

    controller.startup();
    info!("entering control loop");

    loop {
        controller.tick();
        Timer::after_millis(1).await;
    }
}
