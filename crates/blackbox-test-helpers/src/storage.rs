//! Byte-vector storage with flash-like semantics.

use blackbox_hal::{HalError, HalResult, PanicStorage, WriteGrain};

/// A [`PanicStorage`] over plain memory.
///
/// Enforces the grain alignment contract, counts erases and writes, and
/// can be told to fail writes to exercise the panic path's push-past
/// behavior. Erased bytes read as `0xff`, like NOR flash.
#[derive(Debug)]
pub struct MemStorage {
    grain: WriteGrain,
    bytes: Vec<u8>,
    written: usize,
    erases: u32,
    writes: u32,
    fail_writes: bool,
}

impl MemStorage {
    /// An erased slot of the given capacity.
    #[must_use]
    pub fn new(grain: WriteGrain, capacity: usize) -> Self {
        Self {
            grain,
            bytes: vec![0xff; capacity],
            written: 0,
            erases: 0,
            writes: 0,
            fail_writes: false,
        }
    }

    /// Bytes written since the last erase (the persisted image).
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.bytes[..self.written]
    }

    /// Number of erase operations performed.
    #[must_use]
    pub fn erase_count(&self) -> u32 {
        self.erases
    }

    /// Number of successful write operations performed.
    #[must_use]
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl PanicStorage for MemStorage {
    fn write_grain(&self) -> WriteGrain {
        self.grain
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn erase(&mut self) -> HalResult<()> {
        self.erases += 1;
        self.bytes.fill(0xff);
        self.written = 0;
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> HalResult<()> {
        if self.fail_writes {
            return Err(HalError::WriteFailed);
        }
        let grain = self.grain.bytes();
        if offset % grain != 0 || data.len() % grain != 0 {
            return Err(HalError::Misaligned);
        }
        let end = offset.checked_add(data.len()).ok_or(HalError::OutOfBounds)?;
        if end > self.bytes.len() {
            return Err(HalError::OutOfBounds);
        }
        self.bytes[offset..end].copy_from_slice(data);
        self.writes += 1;
        self.written = self.written.max(end);
        Ok(())
    }

    fn read(&self, offset: usize, out: &mut [u8]) -> HalResult<()> {
        let end = offset.checked_add(out.len()).ok_or(HalError::OutOfBounds)?;
        if end > self.bytes.len() {
            return Err(HalError::OutOfBounds);
        }
        out.copy_from_slice(&self.bytes[offset..end]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misaligned_writes_are_rejected() {
        let mut storage = MemStorage::new(WriteGrain::Bytes8, 64);
        assert_eq!(storage.write(4, &[0; 8]), Err(HalError::Misaligned));
        assert_eq!(storage.write(0, &[0; 4]), Err(HalError::Misaligned));
        assert_eq!(storage.write(0, &[0; 8]), Ok(()));
    }

    #[test]
    fn erase_restores_the_flash_idle_pattern() {
        let mut storage = MemStorage::new(WriteGrain::Bytes8, 16);
        storage.write(0, &[0x11; 8]).unwrap();
        assert_eq!(storage.contents(), &[0x11; 8]);
        storage.erase().unwrap();
        assert!(storage.contents().is_empty());
        let mut out = [0_u8; 4];
        storage.read(0, &mut out).unwrap();
        assert_eq!(out, [0xff; 4]);
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut storage = MemStorage::new(WriteGrain::Bytes8, 16);
        assert_eq!(storage.write(16, &[0; 8]), Err(HalError::OutOfBounds));
        let mut out = [0_u8; 32];
        assert_eq!(storage.read(0, &mut out), Err(HalError::OutOfBounds));
    }
}
