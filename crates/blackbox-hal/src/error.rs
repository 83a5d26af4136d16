//! Error types for hardware-boundary operations.

/// Errors reported by hardware-boundary implementations.
///
/// These are deliberately coarse: during a panic the caller cannot do
/// anything with a detailed failure beyond noting it on the console and
/// continuing toward reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// Erase of the reserved panic slot failed.
    #[error("erase of the panic slot failed")]
    EraseFailed,
    /// A write to the reserved panic slot failed.
    #[error("write to the panic slot failed")]
    WriteFailed,
    /// An access was not aligned to the storage write granularity.
    #[error("access not aligned to the write granularity")]
    Misaligned,
    /// An access extends past the end of the reserved panic slot.
    #[error("access extends past the end of the panic slot")]
    OutOfBounds,
    /// The protection hardware cannot express the requested region.
    #[error("protection hardware cannot express the requested region")]
    RegionUnsupported,
}

/// A specialized `Result` type for hardware-boundary operations.
pub type HalResult<T> = core::result::Result<T, HalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn error_display() {
        assert_eq!(
            HalError::EraseFailed.to_string(),
            "erase of the panic slot failed"
        );
        assert_eq!(
            HalError::Misaligned.to_string(),
            "access not aligned to the write granularity"
        );
    }
}
