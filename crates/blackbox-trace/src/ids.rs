//! Identifier space partitioning.
//!
//! Record identifiers are one byte and are partitioned into disjoint
//! ranges per originating module, assigned at build time. Identifiers
//! below [`ID_FIRST_ASSIGNABLE`] are reserved for the core itself.

use crate::error::{TraceError, TraceResult};

/// Never written to the log; reading it back from a captured buffer
/// means the decoder landed on trailing zero fill.
pub const ID_INVALID: u8 = 0x00;

/// Periodic coarse time marker. Logging this id at a fixed interval is
/// the only time sense the wire format carries.
pub const ID_TIME_TICK: u8 = 0x01;

/// First identifier available for module ranges.
pub const ID_FIRST_ASSIGNABLE: u8 = 0x10;

/// A contiguous block of identifiers owned by one module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdRange {
    base: u8,
    len: u8,
}

impl IdRange {
    /// Builds a range of `len` identifiers starting at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::RangeOutOfBounds`] if the range is empty,
    /// starts below [`ID_FIRST_ASSIGNABLE`], or spills past `u8::MAX`.
    pub const fn new(base: u8, len: u8) -> TraceResult<Self> {
        if len == 0 || base < ID_FIRST_ASSIGNABLE {
            return Err(TraceError::RangeOutOfBounds { base, len });
        }
        if base.checked_add(len - 1).is_none() {
            return Err(TraceError::RangeOutOfBounds { base, len });
        }
        Ok(Self { base, len })
    }

    /// First identifier of the range.
    #[must_use]
    pub const fn base(&self) -> u8 {
        self.base
    }

    /// Number of identifiers in the range.
    #[must_use]
    pub const fn len(&self) -> u8 {
        self.len
    }

    /// True when `id` belongs to this range.
    #[must_use]
    pub const fn contains(&self, id: u8) -> bool {
        id >= self.base && (id - self.base) < self.len
    }

    /// The `offset`-th identifier of the range, if in bounds.
    #[must_use]
    pub const fn id(&self, offset: u8) -> Option<u8> {
        if offset < self.len {
            Some(self.base + offset)
        } else {
            None
        }
    }

    /// True when the two ranges share at least one identifier.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.contains(other.base) || other.contains(self.base)
    }
}
