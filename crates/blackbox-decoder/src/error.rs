//! Decode error types.

use thiserror::Error;

/// Errors produced while decoding a report image or hex dump.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The image does not begin with the fault-section tag in either
    /// byte order.
    #[error("not a report: leading tag {found:02x?} matches neither byte order")]
    NotAReport {
        /// The four leading bytes found.
        found: [u8; 4],
    },

    /// A section header or payload runs past the end of the image.
    #[error("section at offset {offset} is truncated (needs {needed} bytes, {available} remain)")]
    TruncatedSection {
        /// Image offset of the section header.
        offset: usize,
        /// Bytes the section claims.
        needed: usize,
        /// Bytes actually remaining.
        available: usize,
    },

    /// A section carries a tag the decoder does not know.
    #[error("unknown section tag {tag:#010x} at offset {offset}")]
    UnknownTag {
        /// The unrecognized tag value.
        tag: u32,
        /// Image offset of the section header.
        offset: usize,
    },

    /// A section length smaller than its own header.
    #[error("section at offset {offset} declares impossible length {len}")]
    BadSectionLength {
        /// Image offset of the section header.
        offset: usize,
        /// Declared length.
        len: u32,
    },

    /// The image ended without a terminating sentinel section.
    #[error("image ended without a sentinel section")]
    MissingSentinel,

    /// The fault record's classification word is not a known class.
    #[error("unknown fault classification {class:#010x}")]
    UnknownClass {
        /// The rejected classification word.
        class: u32,
    },

    /// A required section is absent.
    #[error("report has no {section} section")]
    MissingSection {
        /// Human name of the missing section.
        section: &'static str,
    },

    /// The trace section is too short for its own cursor/capacity
    /// header, or its capacity disagrees with the section length.
    #[error("trace section payload is inconsistent")]
    BadTraceSection,

    /// An identifier table entry is impossible on the wire.
    #[error("id table entry {id:#04x} ({name}) is invalid: {reason}")]
    BadIdSpec {
        /// The offending identifier.
        id: u8,
        /// Its declared name.
        name: String,
        /// What the validation rejected.
        reason: &'static str,
    },

    /// A hex dump line the ingester cannot parse.
    #[error("bad hex dump line {line}: {reason}")]
    BadHexLine {
        /// One-based line number.
        line: usize,
        /// What the parser rejected.
        reason: &'static str,
    },
}

/// Convenience alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
