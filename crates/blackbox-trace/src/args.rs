//! Width-declared trace record arguments.
//!
//! Each argument is an integer truncated to a caller-declared width of
//! 1-4 bytes and stored most-significant-byte first. The width is part of
//! the identifier's contract: the offline decoder is told, per id, how
//! many bytes each argument occupies, so the wire format carries no
//! delimiters or per-record length.

use heapless::Vec;

/// Maximum total argument bytes a single record may carry.
pub const MAX_ARG_BYTES: usize = 8;

/// Maximum encoded record size: one id byte plus [`MAX_ARG_BYTES`].
pub const MAX_RECORD_BYTES: usize = 1 + MAX_ARG_BYTES;

/// A single trace argument: a value and the number of bytes it occupies
/// on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceArg {
    value: u32,
    width: u8,
}

impl TraceArg {
    /// One-byte argument.
    #[must_use]
    pub const fn u8(value: u8) -> Self {
        Self { value: value as u32, width: 1 }
    }

    /// Two-byte argument, big-endian on the wire.
    #[must_use]
    pub const fn u16(value: u16) -> Self {
        Self { value: value as u32, width: 2 }
    }

    /// Three-byte argument; the top byte of `value` is discarded.
    #[must_use]
    pub const fn u24(value: u32) -> Self {
        Self { value: value & 0x00ff_ffff, width: 3 }
    }

    /// Four-byte argument, big-endian on the wire.
    #[must_use]
    pub const fn u32(value: u32) -> Self {
        Self { value, width: 4 }
    }

    /// The truncated value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Bytes this argument occupies on the wire (1-4).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    /// Appends the argument's big-endian bytes to `out`.
    ///
    /// Returns `false` if `out` has no room for all `width` bytes; in
    /// that case `out` is left untouched.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8, MAX_RECORD_BYTES>) -> bool {
        if out.len() + self.width() > out.capacity() {
            return false;
        }
        let be = self.value.to_be_bytes();
        out.extend_from_slice(&be[4 - self.width()..]).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(arg: TraceArg) -> Vec<u8, MAX_RECORD_BYTES> {
        let mut out = Vec::new();
        assert!(arg.encode_into(&mut out));
        out
    }

    #[test]
    fn arguments_encode_most_significant_byte_first() {
        assert_eq!(encoded(TraceArg::u8(0xab)).as_slice(), &[0xab]);
        assert_eq!(encoded(TraceArg::u16(0x1234)).as_slice(), &[0x12, 0x34]);
        assert_eq!(
            encoded(TraceArg::u24(0x00ab_cdef)).as_slice(),
            &[0xab, 0xcd, 0xef]
        );
        assert_eq!(
            encoded(TraceArg::u32(0xdead_beef)).as_slice(),
            &[0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn u24_discards_the_top_byte() {
        assert_eq!(TraceArg::u24(0xff12_3456).value(), 0x0012_3456);
    }

    #[test]
    fn encode_refuses_to_split_an_argument() {
        let mut out: Vec<u8, MAX_RECORD_BYTES> = Vec::new();
        for _ in 0..2 {
            assert!(TraceArg::u32(0).encode_into(&mut out));
        }
        let len_before = out.len();
        assert!(!TraceArg::u16(1).encode_into(&mut out));
        assert_eq!(out.len(), len_before);
    }
}
