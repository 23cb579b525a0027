//! Board glue: implementations of the control loop's collaborator
//! traits for the nRF52840.

pub mod usb;

use core::fmt::Write as _;
use core::ops::Range;

use buzzerkbd::config::{MODIFIER_ADDR, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use buzzerkbd::hal::{ByteStore, Clock, DiagnosticSink};
use defmt::{error, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_futures::block_on;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::peripherals;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Scratch buffer size for sequential-storage map operations.
const STORAGE_BUF_SIZE: usize = 16;

/// Monotonic millisecond clock backed by the Embassy time driver.
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_ms(&mut self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

/// Program-mode diagnostics over defmt/RTT.
pub struct DefmtDiag;

impl DiagnosticSink for DefmtDiag {
    fn line(&mut self, args: core::fmt::Arguments<'_>) {
        let mut s: heapless::String<96> = heapless::String::new();
        if s.write_fmt(args).is_ok() {
            defmt::info!("{=str}", s.as_str());
        } else {
            warn!("diagnostic line truncated");
        }
    }
}

/// The persisted modifier byte, kept in internal flash via the
/// `sequential-storage` map (wear levelling comes for free even though
/// we only ever store one key).
pub struct FlashStore {
    flash: BlockingAsync<Nvmc<'static>>,
}

impl FlashStore {
    pub fn new(nvmc: peripherals::NVMC) -> Self {
        Self {
            flash: BlockingAsync::new(Nvmc::new(nvmc)),
        }
    }

    fn range() -> Range<u32> {
        let start = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;
        start..start + STORAGE_FLASH_PAGE_COUNT * FLASH_PAGE_SIZE
    }
}

impl ByteStore for FlashStore {
    fn read(&mut self, addr: u32) -> u8 {
        debug_assert_eq!(addr, MODIFIER_ADDR);
        let mut buf = [0u8; STORAGE_BUF_SIZE];
        match block_on(fetch_item::<u8, u8, _>(
            &mut self.flash,
            Self::range(),
            &mut NoCache::new(),
            &mut buf,
            &(addr as u8),
        )) {
            Ok(Some(value)) => value,
            // Fresh device: reads as erased, decodes to the invalid
            // sentinel upstream.
            Ok(None) => 0xFF,
            Err(e) => {
                warn!("flash read failed: {:?}", defmt::Debug2Format(&e));
                0xFF
            }
        }
    }

    fn write(&mut self, addr: u32, value: u8) {
        debug_assert_eq!(addr, MODIFIER_ADDR);
        let mut buf = [0u8; STORAGE_BUF_SIZE];
        if let Err(e) = block_on(store_item::<u8, u8, _>(
            &mut self.flash,
            Self::range(),
            &mut NoCache::new(),
            &mut buf,
            &(addr as u8),
            &value,
        )) {
            // Fail-soft: the selection survives in memory until reboot.
            error!("flash write failed: {:?}", defmt::Debug2Format(&e));
        }
    }
}
