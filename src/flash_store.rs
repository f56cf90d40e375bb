//! Flash-backed storage for the track selection.
//!
//! The topmost 4 KB erase sector holds one record: magic word, payload
//! length, postcard-encoded payload, CRC32. A sector that fails any of those
//! checks reads as the erased word, which the selector layer corrects to
//! track 0. The record is rewritten once per confirmed button press, well
//! inside the flash's erase-cycle budget.

use core::cell::RefCell;
use crc32fast::Hasher;
use defmt::{error, info};
use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash as EmbassyFlash};
use embassy_rp::peripherals::FLASH;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use static_cell::StaticCell;

use crate::selector::{ERASED_WORD, SelectionStore};
use crate::tracks::TrackId;
use crate::{Error, Result};

// Internal flash size for Raspberry Pi Pico 2 (4 MB).
#[cfg(feature = "pico2")]
const INTERNAL_FLASH_SIZE: usize = 4 * 1024 * 1024;

// Internal flash size for Raspberry Pi Pico 1 W (2 MB).
#[cfg(not(feature = "pico2"))]
const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

const MAGIC: u32 = 0x5452_4B53; // 'TRKS'
const HEADER_SIZE: usize = 4 + 2; // Magic + PayloadLen
const CRC_SIZE: usize = 4;
const MAX_PAYLOAD_SIZE: usize = 16; // the payload is one small integer

/// Shared flash manager that owns the hardware driver.
struct FlashManager {
    flash: Mutex<
        CriticalSectionRawMutex,
        RefCell<EmbassyFlash<'static, FLASH, Blocking, INTERNAL_FLASH_SIZE>>,
    >,
}

impl FlashManager {
    fn new(peripheral: Peri<'static, FLASH>) -> Self {
        Self {
            flash: Mutex::new(RefCell::new(EmbassyFlash::new_blocking(peripheral))),
        }
    }

    fn with_flash<R>(
        &self,
        f: impl FnOnce(&mut EmbassyFlash<'static, FLASH, Blocking, INTERNAL_FLASH_SIZE>) -> Result<R>,
    ) -> Result<R> {
        self.flash.lock(|flash| {
            let mut flash_ref = flash.borrow_mut();
            f(&mut *flash_ref)
        })
    }
}

/// The selection record lives in the last erase sector, clear of the firmware
/// image at the bottom of flash.
const fn record_offset() -> u32 {
    (INTERNAL_FLASH_SIZE - ERASE_SIZE) as u32
}

/// Flash-backed [`SelectionStore`] holding the current track selection.
///
/// Created once at startup; the startup load happens before the button task
/// is spawned, after which only that task touches the record.
pub struct SelectionFlash {
    manager: &'static FlashManager,
}

impl SelectionFlash {
    /// Claims the flash peripheral and binds the selection record sector.
    #[must_use]
    pub fn new(peripheral: Peri<'static, FLASH>) -> Self {
        static MANAGER: StaticCell<FlashManager> = StaticCell::new();
        Self {
            manager: MANAGER.init(FlashManager::new(peripheral)),
        }
    }

    /// Erases the record, so the next boot starts from track 0.
    pub fn clear(&mut self) -> Result<()> {
        let offset = record_offset();
        self.manager.with_flash(|flash| {
            flash
                .blocking_erase(offset, offset + ERASE_SIZE as u32)
                .map_err(Error::Flash)?;
            Ok(())
        })?;
        info!("flash: selection record cleared");
        Ok(())
    }

    fn read_record(&mut self) -> Option<TrackId> {
        let offset = record_offset();
        let mut buffer = [0_u8; ERASE_SIZE];

        let read = self.manager.with_flash(|flash| {
            flash
                .blocking_read(offset, &mut buffer)
                .map_err(Error::Flash)?;
            Ok(())
        });
        if read.is_err() {
            error!("flash: selection record unreadable");
            return None;
        }

        let magic = u32::from_le_bytes(buffer[0..4].try_into().unwrap());
        if magic != MAGIC {
            info!("flash: no selection record");
            return None;
        }

        let payload_len = u16::from_le_bytes(buffer[4..6].try_into().unwrap()) as usize;
        if payload_len > MAX_PAYLOAD_SIZE {
            error!("flash: invalid record length {}", payload_len);
            return None;
        }

        let crc_offset = HEADER_SIZE + payload_len;
        let stored_crc = u32::from_le_bytes(
            buffer[crc_offset..crc_offset + CRC_SIZE]
                .try_into()
                .unwrap(),
        );
        let computed_crc = compute_crc(&buffer[0..crc_offset]);
        if stored_crc != computed_crc {
            error!(
                "flash: record CRC mismatch (expected {}, found {})",
                computed_crc, stored_crc
            );
            return None;
        }

        let payload = &buffer[HEADER_SIZE..crc_offset];
        match postcard::from_bytes(payload) {
            Ok(id) => Some(id),
            Err(_) => {
                error!("flash: record payload undecodable");
                None
            }
        }
    }
}

impl SelectionStore for SelectionFlash {
    fn load_word(&mut self) -> u16 {
        self.read_record()
            .map_or(ERASED_WORD, |id: TrackId| id.index() as u16)
    }

    fn store_selection(&mut self, id: TrackId) -> Result<()> {
        let mut payload_buffer = [0_u8; MAX_PAYLOAD_SIZE];
        let payload_len = postcard::to_slice(&id, &mut payload_buffer)
            .map_err(|_| Error::RecordTooLarge)?
            .len();

        let mut buffer = [0xFF_u8; ERASE_SIZE];
        buffer[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buffer[4..6].copy_from_slice(&(payload_len as u16).to_le_bytes());
        buffer[HEADER_SIZE..HEADER_SIZE + payload_len]
            .copy_from_slice(&payload_buffer[..payload_len]);

        let crc_offset = HEADER_SIZE + payload_len;
        let crc = compute_crc(&buffer[0..crc_offset]);
        buffer[crc_offset..crc_offset + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());

        let offset = record_offset();
        self.manager.with_flash(|flash| {
            flash
                .blocking_erase(offset, offset + ERASE_SIZE as u32)
                .map_err(Error::Flash)?;
            flash.blocking_write(offset, &buffer).map_err(Error::Flash)?;
            Ok(())
        })?;

        info!("flash: selection saved (track {})", id.index());
        Ok(())
    }
}

/// Compute CRC32 checksum.
fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
