//! Guard-specific error types.

use blackbox_hal::HalError;
use thiserror::Error;

/// Errors produced while validating or installing the stack guard.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// Guard base or length is not word-aligned.
    #[error("guard region {base:#010x}+{len} is not word-aligned")]
    Misaligned {
        /// Requested base address.
        base: u32,
        /// Requested length in bytes.
        len: u32,
    },

    /// Guard region is smaller than the protection hardware supports.
    #[error("guard region of {len} bytes is below the {min}-byte minimum")]
    TooSmall {
        /// Requested length in bytes.
        len: u32,
        /// Minimum supported length.
        min: u32,
    },

    /// Guard region wraps past the end of the address space.
    #[error("guard region {base:#010x}+{len} overflows the address space")]
    AddressOverflow {
        /// Requested base address.
        base: u32,
        /// Requested length in bytes.
        len: u32,
    },

    /// The protection unit rejected the region.
    #[error("protection unit rejected the guard region")]
    Protection(#[from] HalError),
}

/// Convenience alias for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display_carries_the_rejected_bounds() {
        let err = GuardError::Misaligned { base: 0x2000_0002, len: 32 };
        assert!(err.to_string().contains("0x20000002"));

        let err = GuardError::TooSmall { len: 16, min: 32 };
        assert!(err.to_string().contains("16"));
    }

    #[test]
    fn hal_errors_convert_into_protection_failures() {
        let err: GuardError = HalError::RegionUnsupported.into();
        assert!(matches!(err, GuardError::Protection(_)));
    }
}
