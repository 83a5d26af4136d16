//! Console hex-dump ingestion.
//!
//! The panic path echoes the report as `OFFSET: BYTES` lines. When the
//! storage copy is unavailable (slot occupied, write failures), a
//! captured console log is the only copy, so the decoder accepts the
//! dump directly. Parsing is deliberately forgiving: blank lines and
//! non-hex lines (boot banners, storage-failure markers) are skipped,
//! byte runs may be spaced or packed, and lines are reassembled in
//! offset order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{DecodeError, DecodeResult};

/// Reassembles a report image from console hex-dump text.
///
/// # Errors
///
/// Returns [`DecodeError::BadHexLine`] when a line that looks like a
/// dump line (hex offset and colon) carries an odd number of hex digits
/// or non-hex characters in its byte run.
pub fn parse_hex_dump(text: &str) -> DecodeResult<Vec<u8>> {
    let mut chunks: BTreeMap<u32, Vec<u8>> = BTreeMap::new();
    let mut skipped = 0_usize;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let Some((offset_part, bytes_part)) = raw.split_once(':') else {
            skipped += 1;
            continue;
        };
        let Ok(offset) = u32::from_str_radix(offset_part.trim(), 16) else {
            skipped += 1;
            continue;
        };

        let digits: String = bytes_part.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() {
            continue;
        }
        if digits.len() % 2 != 0 {
            return Err(DecodeError::BadHexLine {
                line: line_no,
                reason: "odd number of hex digits",
            });
        }
        let mut bytes = Vec::with_capacity(digits.len() / 2);
        for pair in digits.as_bytes().chunks_exact(2) {
            let pair = core::str::from_utf8(pair).unwrap_or("");
            let byte = u8::from_str_radix(pair, 16).map_err(|_| DecodeError::BadHexLine {
                line: line_no,
                reason: "non-hex character in byte run",
            })?;
            bytes.push(byte);
        }
        chunks.insert(offset, bytes);
    }

    debug!(chunks = chunks.len(), skipped, "hex dump ingested");

    let mut image = Vec::new();
    for (offset, bytes) in chunks {
        let offset = offset as usize;
        if offset < image.len() {
            // Re-emitted line (e.g. the log captured two boots); later
            // data wins, matching what the console actually showed last.
            image.truncate(offset);
        } else if offset > image.len() {
            image.resize(offset, 0);
        }
        image.extend_from_slice(&bytes);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_dump_round_trips() {
        let text = "00000000: deadbeef\r\n00000004: 0102\r\n";
        assert_eq!(
            parse_hex_dump(text).unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef, 0x01, 0x02]
        );
    }

    #[test]
    fn banners_and_markers_are_skipped() {
        let text = "boot v1.2\n00000000: aabb\n!STORAGE-WRITE-FAILED\n00000002: cc\n";
        assert_eq!(parse_hex_dump(text).unwrap(), vec![0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn spaced_byte_runs_are_accepted() {
        let text = "00000000: aa bb cc dd\n";
        assert_eq!(parse_hex_dump(text).unwrap(), vec![0xaa, 0xbb, 0xcc, 0xdd]);
    }

    #[test]
    fn out_of_order_lines_reassemble_by_offset() {
        let text = "00000002: 0304\n00000000: 0102\n";
        assert_eq!(parse_hex_dump(text).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn odd_digit_count_is_an_error() {
        let err = parse_hex_dump("00000000: abc\n").unwrap_err();
        assert!(matches!(err, DecodeError::BadHexLine { line: 1, .. }));
    }

    #[test]
    fn non_hex_bytes_are_an_error() {
        let err = parse_hex_dump("00000000: zz\n").unwrap_err();
        assert!(matches!(err, DecodeError::BadHexLine { .. }));
    }

    #[test]
    fn gap_between_lines_zero_fills() {
        let text = "00000000: aa\n00000004: bb\n";
        assert_eq!(parse_hex_dump(text).unwrap(), vec![0xaa, 0, 0, 0, 0xbb]);
    }

    proptest! {
        /// Any byte image formatted the way the panic-path echo formats
        /// it (32 bytes per offset-prefixed line) parses back intact.
        #[test]
        fn echo_format_round_trips(image in prop::collection::vec(any::<u8>(), 0..200)) {
            let mut text = String::new();
            for (i, line) in image.chunks(32).enumerate() {
                text.push_str(&format!("{:08x}: ", i * 32));
                for byte in line {
                    text.push_str(&format!("{byte:02x}"));
                }
                text.push_str("\r\n");
            }
            prop_assert_eq!(parse_hex_dump(&text).unwrap(), image);
        }
    }
}
