//! USB HID keyboard device.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one boot-protocol keyboard endpoint. The
//! control loop pushes reports into a channel; a dedicated task drains
//! it onto the endpoint so the (blocking) control loop never touches
//! the async USB stack directly.

use buzzerkbd::config;
use buzzerkbd::hal::HidSink;
use buzzerkbd::keys::{ascii_to_usage, KeyboardReport, VirtualKey, KEYBOARD_REPORT_DESCRIPTOR};
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{Config as HidConfig, HidWriter, State};
use embassy_usb::{Builder, Config, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

static KB_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Outbound report queue between the control loop and the USB task.
static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, KeyboardReport, 8> = Channel::new();

type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

/// Build result containing the USB device runner and the HID writer.
pub struct UsbKeyboard {
    pub device: UsbDevice<'static, UsbDriver>,
    pub keyboard_writer: HidWriter<'static, UsbDriver, 8>,
}

/// Initialise the USB stack and create the keyboard device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbKeyboard {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let hid_config = HidConfig {
        report_descriptor: KEYBOARD_REPORT_DESCRIPTOR,
        request_handler: None,
        poll_ms: config::USB_HID_POLL_MS,
        max_packet_size: 8,
    };
    let keyboard_writer = HidWriter::new(&mut builder, KB_STATE.init(State::new()), hid_config);

    let device = builder.build();
    info!("USB HID keyboard initialised");

    UsbKeyboard {
        device,
        keyboard_writer,
    }
}

/// Run the USB device state machine.
#[embassy_executor::task]
pub async fn usb_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

/// Drain queued keyboard reports onto the HID endpoint.
#[embassy_executor::task]
pub async fn hid_writer_task(mut writer: HidWriter<'static, UsbDriver, 8>) -> ! {
    loop {
        let report = REPORT_CHANNEL.receive().await;
        let mut buf = [0u8; 8];
        report.serialize(&mut buf);
        if let Err(e) = writer.write(&buf).await {
            warn!("HID write failed: {:?}", e);
        }
    }
}

/// The control loop's view of the USB transport: tracks which modifiers
/// are held and queues boot-protocol reports.
pub struct UsbHidSink {
    modifier: u8,
}

impl UsbHidSink {
    pub fn new() -> Self {
        Self { modifier: 0 }
    }

    fn send(&self, report: KeyboardReport) {
        // Fail-soft: if the host stops draining (queue full), drop the
        // report rather than stall the control loop.
        if REPORT_CHANNEL.try_send(report).is_err() {
            warn!("HID report queue full, dropping report");
        }
    }
}

impl HidSink for UsbHidSink {
    fn press(&mut self, key: VirtualKey) {
        self.modifier |= key.modifier_bit();
        self.send(KeyboardReport::single(self.modifier, 0));
    }

    fn write(&mut self, ch: u8) {
        let usage = ascii_to_usage(ch);
        self.send(KeyboardReport::single(self.modifier, usage));
        self.send(KeyboardReport::single(self.modifier, 0));
    }

    fn release_all(&mut self) {
        self.modifier = 0;
        self.send(KeyboardReport::empty());
    }
}
