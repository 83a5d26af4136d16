//! Sentinel painting and protection-unit installation.
//!
//! The capture logic here operates on plain word slices so it is
//! testable on the host; the single unsafe seam that turns link-time
//! addresses into a slice is [`stack_paint_area`].

use blackbox_hal::MemoryProtection;

use crate::error::GuardResult;
use crate::region::{GuardRegion, SENTINEL};

/// Fills every word of the paint area with [`SENTINEL`].
///
/// `words` spans from the bottom of the guard region up to (but not
/// including) the word the current stack pointer addresses, lowest
/// address first.
pub fn paint(words: &mut [u32]) {
    words.fill(SENTINEL);
}

/// Paints the stack area and programs the guard region read-only and
/// non-executable.
///
/// Called once at startup, before interrupts are enabled, so nothing can
/// push onto the stack between the paint and the protection enable.
///
/// # Errors
///
/// Propagates the protection unit's rejection; the paint still happened,
/// so the high-water diagnostic works even when protection is
/// unavailable.
pub fn install<M: MemoryProtection + ?Sized>(
    words: &mut [u32],
    mpu: &mut M,
    region: &GuardRegion,
) -> GuardResult<()> {
    paint(words);
    mpu.protect(region.as_protected_range())?;
    Ok(())
}

/// True when a memory-protection fault at `fault_addr` was a store into
/// the guard, i.e. a stack overflow.
#[must_use]
pub fn is_guard_violation(fault_addr: u32, region: &GuardRegion) -> bool {
    region.contains(fault_addr)
}

/// Builds the mutable paint area from the link-time guard base and the
/// current stack pointer.
///
/// # Safety
///
/// `region.base()..sp` must be a readable, writable, word-aligned range
/// that no other code is concurrently using as live stack or data, and
/// `sp` must not be below `region.base()`. In practice this is only
/// sound during early startup, before interrupts are enabled, with `sp`
/// read immediately beforehand.
#[must_use]
pub unsafe fn stack_paint_area(region: &GuardRegion, sp: u32) -> &'static mut [u32] {
    let len = (sp.saturating_sub(region.base()) / 4) as usize;
    // SAFETY: caller guarantees the range is valid, exclusive and word-aligned.
    unsafe { core::slice::from_raw_parts_mut(region.base() as *mut u32, len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackbox_hal::{HalError, HalResult, ProtectedRange};

    struct StubMpu {
        programmed: Option<ProtectedRange>,
        reject: bool,
    }

    impl MemoryProtection for StubMpu {
        fn protect(&mut self, range: ProtectedRange) -> HalResult<()> {
            if self.reject {
                return Err(HalError::RegionUnsupported);
            }
            self.programmed = Some(range);
            Ok(())
        }

        fn disable(&mut self) {}
    }

    #[test]
    fn install_paints_then_programs_the_region() {
        let region = GuardRegion::new(0x2000_0000, 32).unwrap();
        let mut stack = [0u32; 16];
        let mut mpu = StubMpu { programmed: None, reject: false };

        install(&mut stack, &mut mpu, &region).unwrap();

        assert!(stack.iter().all(|w| *w == SENTINEL));
        assert_eq!(mpu.programmed, Some(region.as_protected_range()));
    }

    #[test]
    fn install_reports_protection_rejection_after_painting() {
        let region = GuardRegion::new(0x2000_0000, 32).unwrap();
        let mut stack = [0u32; 8];
        let mut mpu = StubMpu { programmed: None, reject: true };

        let err = install(&mut stack, &mut mpu, &region).unwrap_err();
        assert!(matches!(err, crate::GuardError::Protection(_)));
        assert!(stack.iter().all(|w| *w == SENTINEL));
    }

    #[test]
    fn violation_check_is_exactly_the_region_bounds() {
        let region = GuardRegion::new(0x2000_0000, 32).unwrap();
        assert!(is_guard_violation(0x2000_0010, &region));
        assert!(!is_guard_violation(0x2000_0020, &region));
        assert!(!is_guard_violation(0x1fff_fffc, &region));
    }
}
