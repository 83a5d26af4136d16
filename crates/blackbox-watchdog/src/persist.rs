//! The reset-surviving initialization failure counter.
//!
//! Lives in a memory region excluded from the normal startup zero/copy
//! step, so its contents survive a watchdog-induced reset. Nothing about
//! that region is trustworthy on first boot or after corruption, so the
//! record is validated (magic plus checksum) before every use and
//! repaired to zero when invalid.

/// Tag identifying an initialized counter record.
const COUNTER_MAGIC: u32 = 0x5744_4731; // "WDG1"

/// Consecutive-failed-initialization counter, placed in no-init memory
/// by the target firmware (`#[link_section]` on the containing static).
///
/// All mutation goes through methods that keep the checksum in step, so
/// a record interrupted mid-reset validates as either the old value or
/// garbage, never as a silently wrong count.
#[derive(Debug)]
#[repr(C)]
pub struct PersistedCounter {
    magic: u32,
    failed_inits: u32,
    check: u32,
}

impl PersistedCounter {
    /// A fresh, valid record with a zero count.
    ///
    /// Only used for host tests and documentation; on target the record
    /// is whatever the no-init region holds, repaired by
    /// [`validate_or_reset`](Self::validate_or_reset).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            magic: COUNTER_MAGIC,
            failed_inits: 0,
            check: Self::checksum(0),
        }
    }

    /// Checks magic and checksum; on any mismatch the record is repaired
    /// to a valid zero count. Must run before the first read of a boot.
    ///
    /// Returns `true` when the existing contents were trusted.
    pub fn validate_or_reset(&mut self) -> bool {
        let valid = self.magic == COUNTER_MAGIC && self.check == Self::checksum(self.failed_inits);
        if !valid {
            self.set(0);
        }
        valid
    }

    /// Current consecutive-failure count.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.failed_inits
    }

    /// Pessimistically records one more failed initialization.
    pub fn increment(&mut self) {
        self.set(self.failed_inits.saturating_add(1));
    }

    /// Zeroes the count: startup completed, corruption detected, or the
    /// reset was not watchdog-attributed.
    pub fn clear(&mut self) {
        self.set(0);
    }

    fn set(&mut self, count: u32) {
        self.magic = COUNTER_MAGIC;
        self.failed_inits = count;
        self.check = Self::checksum(count);
    }

    const fn checksum(count: u32) -> u32 {
        !(COUNTER_MAGIC ^ count)
    }
}

impl Default for PersistedCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Raw no-init memory as the first boot sees it.
    fn garbage() -> PersistedCounter {
        PersistedCounter {
            magic: 0xffff_ffff,
            failed_inits: 0x1234_5678,
            check: 0,
        }
    }

    #[test]
    fn fresh_record_validates() {
        let mut counter = PersistedCounter::new();
        assert!(counter.validate_or_reset());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn garbage_is_repaired_to_zero() {
        let mut counter = garbage();
        assert!(!counter.validate_or_reset());
        assert_eq!(counter.count(), 0);
        assert!(counter.validate_or_reset());
    }

    #[test]
    fn counts_survive_a_validate_cycle() {
        let mut counter = PersistedCounter::new();
        counter.increment();
        counter.increment();
        assert!(counter.validate_or_reset());
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn a_flipped_count_fails_the_checksum() {
        let mut counter = PersistedCounter::new();
        counter.increment();
        counter.failed_inits ^= 0x0000_0100;
        assert!(!counter.validate_or_reset());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn clear_resets_and_stays_valid() {
        let mut counter = PersistedCounter::new();
        counter.increment();
        counter.clear();
        assert_eq!(counter.count(), 0);
        assert!(counter.validate_or_reset());
    }
}
