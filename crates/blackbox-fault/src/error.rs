//! Diagnostic-surface error types.
//!
//! The panic path itself never returns errors - storage failures there
//! are counted and pushed past. These errors belong to the cooperative
//! read/clear surface a console exercises after reboot.

use blackbox_hal::HalError;
use thiserror::Error;

/// Errors from the persisted-report diagnostic surface.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultError {
    /// The reserved slot does not hold a report.
    #[error("no report in the reserved slot")]
    NoReport,

    /// The persisted image is malformed: a section ran past the slot or
    /// the sentinel never appeared.
    #[error("persisted report is malformed at offset {offset}")]
    Malformed {
        /// Slot offset of the offending section header.
        offset: usize,
    },

    /// The caller's buffer cannot hold the report.
    #[error("report of {needed} bytes exceeds buffer of {available}")]
    BufferTooSmall {
        /// Report size in bytes.
        needed: usize,
        /// Caller buffer size.
        available: usize,
    },

    /// The storage primitive failed.
    #[error("storage access failed")]
    Storage(#[from] HalError),
}

/// Convenience alias for diagnostic operations.
pub type FaultResult<T> = Result<T, FaultError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display_carries_sizes_and_offsets() {
        let err = FaultError::BufferTooSmall { needed: 200, available: 64 };
        let text = err.to_string();
        assert!(text.contains("200"));
        assert!(text.contains("64"));

        assert!(FaultError::Malformed { offset: 96 }.to_string().contains("96"));
    }

    #[test]
    fn hal_errors_convert() {
        let err: FaultError = HalError::OutOfBounds.into();
        assert!(matches!(err, FaultError::Storage(_)));
    }
}
