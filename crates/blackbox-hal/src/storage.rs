//! The reserved persistent-storage slot for fault reports.

use crate::error::HalResult;

/// Minimum write size and alignment of the flash controller.
///
/// An enum rather than a bare byte count so report-writing code never has
/// to validate it at panic time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum WriteGrain {
    /// 8-byte write rows.
    Bytes8 = 8,
    /// 16-byte write rows.
    Bytes16 = 16,
}

impl WriteGrain {
    /// Grain size in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Rounds `len` up to the next grain boundary.
    #[must_use]
    pub const fn round_up(self, len: usize) -> usize {
        len.div_ceil(self.bytes()) * self.bytes()
    }
}

/// One fixed, page-granular persistent-storage slot.
///
/// The slot is exclusively owned by the fault handler for writes and by the
/// diagnostic read/clear surface otherwise; the two never overlap because
/// panic writes happen only on a path that ends in reset.
///
/// Implementations must be usable with interrupts fully disabled: no
/// interrupt-driven completion, polling only.
pub trait PanicStorage {
    /// Minimum write size and alignment (8 or 16 bytes depending on the
    /// flash controller).
    fn write_grain(&self) -> WriteGrain;

    /// Total slot capacity in bytes.
    fn capacity(&self) -> usize;

    /// Erase the whole slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the erase operation fails or times out.
    fn erase(&mut self) -> HalResult<()>;

    /// Write `data` at `offset` within the slot.
    ///
    /// Both `offset` and `data.len()` must be multiples of
    /// [`write_grain`](PanicStorage::write_grain), and the slot must have
    /// been erased since the last write to this range.
    ///
    /// # Errors
    ///
    /// Returns an error on misalignment, out-of-bounds access, or a
    /// hardware write failure.
    fn write(&mut self, offset: usize, data: &[u8]) -> HalResult<()>;

    /// Read `out.len()` bytes starting at `offset`.
    ///
    /// Reads have no alignment requirement.
    ///
    /// # Errors
    ///
    /// Returns an error if the range extends past the end of the slot.
    fn read(&self, offset: usize, out: &mut [u8]) -> HalResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_lands_on_grain_boundaries() {
        assert_eq!(WriteGrain::Bytes8.round_up(0), 0);
        assert_eq!(WriteGrain::Bytes8.round_up(1), 8);
        assert_eq!(WriteGrain::Bytes8.round_up(88), 88);
        assert_eq!(WriteGrain::Bytes16.round_up(88), 96);
        assert_eq!(WriteGrain::Bytes16.round_up(96), 96);
    }
}
