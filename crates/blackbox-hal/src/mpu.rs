//! Memory-protection programming for the stack guard region.

use crate::error::HalResult;

/// An address range handed to the protection hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedRange {
    /// Base address of the range.
    pub base: u32,
    /// Length of the range in bytes.
    pub len: u32,
}

impl ProtectedRange {
    /// Create a range covering `len` bytes starting at `base`.
    #[must_use]
    pub const fn new(base: u32, len: u32) -> Self {
        Self { base, len }
    }

    /// One past the last address of the range.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.base.saturating_add(self.len)
    }

    /// True when `addr` falls inside the range.
    #[must_use]
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.base && addr < self.end()
    }
}

/// One read-only, execute-never protection region.
///
/// The stack guard programs a single region at startup before interrupts
/// are enabled; the fault handler disables protection globally on entry to
/// panic mode so that diagnostic reads cannot raise a secondary fault.
pub trait MemoryProtection {
    /// Mark `range` read-only and non-executable and enable protection
    /// globally (background mapping stays in place for all other
    /// addresses, and the region applies to exception handlers too).
    ///
    /// # Errors
    ///
    /// Returns an error if the hardware cannot express the range (size or
    /// alignment outside what the region registers support).
    fn protect(&mut self, range: ProtectedRange) -> HalResult<()>;

    /// Disable protection globally. Infallible; used mid-panic.
    fn disable(&mut self);
}
