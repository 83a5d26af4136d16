//! Cooperative read/clear surface for the persisted report.
//!
//! Consumed by a console or equivalent after reboot. Never runs
//! concurrently with the panic path: panic writes happen only on a path
//! that ends in reset, so the two owners of the slot are mutually
//! exclusive by construction.

use blackbox_hal::PanicStorage;

use crate::error::{FaultError, FaultResult};
use crate::report::{SECTION_HEADER_BYTES, TAG_END, TAG_FAULT, slot_holds_report};

/// Whether the reserved slot holds an unconsumed report.
///
/// # Errors
///
/// Propagates storage read failures.
pub fn report_present(storage: &dyn PanicStorage) -> FaultResult<bool> {
    Ok(slot_holds_report(storage)?)
}

/// Total byte length of the persisted report, sentinel included.
///
/// # Errors
///
/// [`FaultError::NoReport`] when the slot is empty,
/// [`FaultError::Malformed`] when a section runs past the slot or the
/// sentinel never appears.
pub fn report_len(storage: &dyn PanicStorage) -> FaultResult<usize> {
    if !slot_holds_report(storage)? {
        return Err(FaultError::NoReport);
    }

    let capacity = storage.capacity();
    let mut offset = 0_usize;
    loop {
        if offset + SECTION_HEADER_BYTES > capacity {
            return Err(FaultError::Malformed { offset });
        }
        let mut header = [0_u8; SECTION_HEADER_BYTES];
        storage.read(offset, &mut header)?;
        let tag = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        if len < SECTION_HEADER_BYTES || offset + len > capacity {
            return Err(FaultError::Malformed { offset });
        }
        offset += len;
        if tag == TAG_END {
            return Ok(offset);
        }
    }
}

/// Copies the whole persisted report into `out`, returning its length.
///
/// # Errors
///
/// Everything [`report_len`] reports, plus
/// [`FaultError::BufferTooSmall`] when `out` cannot hold the report.
pub fn read_report(storage: &dyn PanicStorage, out: &mut [u8]) -> FaultResult<usize> {
    let len = report_len(storage)?;
    if len > out.len() {
        return Err(FaultError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    }
    storage.read(0, &mut out[..len])?;
    Ok(len)
}

/// Consumes the report: erases the slot so the next fault may claim it.
///
/// # Errors
///
/// Propagates the erase failure.
pub fn clear_report(storage: &mut dyn PanicStorage) -> FaultResult<()> {
    storage.erase()?;
    Ok(())
}
