//! Trace-specific error types.

use thiserror::Error;

/// Errors produced by the trace log and identifier allocation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    /// An identifier range would spill past the one-byte id space or
    /// reach into the reserved low identifiers.
    #[error("identifier range base {base:#04x} len {len} does not fit the id space")]
    RangeOutOfBounds {
        /// First identifier of the rejected range.
        base: u8,
        /// Requested number of identifiers.
        len: u8,
    },

    /// A record declared more argument bytes than the wire format allows.
    #[error("record {id:#04x} carries {requested} argument bytes, limit is {limit}")]
    ArgBudgetExceeded {
        /// Identifier of the rejected record.
        id: u8,
        /// Total argument bytes requested.
        requested: usize,
        /// Maximum argument bytes per record.
        limit: usize,
    },
}

/// Convenience alias for trace operations.
pub type TraceResult<T> = Result<T, TraceError>;
