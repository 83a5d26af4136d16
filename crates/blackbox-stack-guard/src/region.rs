//! The guard region: a validated, link-time-fixed address range.

use blackbox_hal::ProtectedRange;

use crate::error::{GuardError, GuardResult};

/// Pattern painted over unused stack words.
///
/// Scanned word-by-word for the high-water mark, so it must be a value
/// no code path plausibly leaves on the stack in bulk.
pub const SENTINEL: u32 = 0xcafe_badd;

/// Smallest guard the protection hardware supports, in bytes.
pub const MIN_GUARD_BYTES: u32 = 32;

/// A read-only, execute-disabled range placed immediately adjacent to
/// (below) the reserved stack area.
///
/// Addresses come from the link script; validation happens once at
/// construction so the panic path can trust the bounds unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardRegion {
    base: u32,
    len: u32,
}

impl GuardRegion {
    /// Validates and builds a guard region.
    ///
    /// # Errors
    ///
    /// Rejects regions that are not word-aligned, smaller than
    /// [`MIN_GUARD_BYTES`], or that wrap past the end of the address
    /// space.
    pub const fn new(base: u32, len: u32) -> GuardResult<Self> {
        if base % 4 != 0 || len % 4 != 0 {
            return Err(GuardError::Misaligned { base, len });
        }
        if len < MIN_GUARD_BYTES {
            return Err(GuardError::TooSmall { len, min: MIN_GUARD_BYTES });
        }
        if base.checked_add(len).is_none() {
            return Err(GuardError::AddressOverflow { base, len });
        }
        Ok(Self { base, len })
    }

    /// Lowest address of the guard.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Guard length in bytes.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// One past the highest guarded address; the bottom of the usable
    /// stack.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.base + self.len
    }

    /// Guard length in words.
    #[must_use]
    pub const fn words(&self) -> usize {
        (self.len / 4) as usize
    }

    /// True when `addr` falls inside the guard.
    #[must_use]
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.base && addr < self.end()
    }

    /// The range handed to the protection unit.
    #[must_use]
    pub const fn as_protected_range(&self) -> ProtectedRange {
        ProtectedRange::new(self.base, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_enforces_alignment_and_minimum_size() {
        assert!(GuardRegion::new(0x2000_0000, 32).is_ok());
        assert_eq!(
            GuardRegion::new(0x2000_0002, 32),
            Err(GuardError::Misaligned { base: 0x2000_0002, len: 32 })
        );
        assert_eq!(
            GuardRegion::new(0x2000_0000, 30),
            Err(GuardError::Misaligned { base: 0x2000_0000, len: 30 })
        );
        assert_eq!(
            GuardRegion::new(0x2000_0000, 16),
            Err(GuardError::TooSmall { len: 16, min: 32 })
        );
        assert!(GuardRegion::new(0xffff_fff0, 32).is_err());
    }

    #[test]
    fn bounds_are_half_open() {
        let region = GuardRegion::new(0x2000_0000, 32).unwrap();
        assert!(!region.contains(0x1fff_ffff));
        assert!(region.contains(0x2000_0000));
        assert!(region.contains(0x2000_001f));
        assert!(!region.contains(0x2000_0020));
        assert_eq!(region.end(), 0x2000_0020);
        assert_eq!(region.words(), 8);
    }
}
