//! Trace-capture decoding: the identifier table and the alignment
//! search.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{DecodeError, DecodeResult};
use crate::report::TraceCapture;

/// Identifier the writer never assigns; reading it back means zero fill
/// from the never-written part of the ring.
const ID_PADDING: u8 = 0x00;

/// Maximum argument bytes a record may carry on the wire.
const MAX_ARG_BYTES: usize = 8;

/// Wire description of one record identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSpec {
    /// Human name, e.g. `"motor.fault"`.
    pub name: String,
    /// Byte width of each argument, in order (1-4 each, 8 total max).
    #[serde(default)]
    pub arg_widths: Vec<u8>,
}

impl IdSpec {
    fn arg_bytes(&self) -> usize {
        self.arg_widths.iter().map(|w| *w as usize).sum()
    }
}

/// The build-time identifier assignment, reconstructed offline.
///
/// Loaded from JSON (id number as the key) alongside the firmware
/// image; the decoder cannot know record boundaries without it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdTable {
    entries: BTreeMap<u8, IdSpec>,
}

impl IdTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one identifier.
    ///
    /// # Errors
    ///
    /// Rejects the padding id, argument widths outside 1-4, and records
    /// wider than the 8-argument-byte wire limit.
    pub fn insert(
        &mut self,
        id: u8,
        name: impl Into<String>,
        arg_widths: &[u8],
    ) -> DecodeResult<()> {
        let name = name.into();
        let spec = IdSpec { name: name.clone(), arg_widths: arg_widths.to_vec() };
        if id == ID_PADDING {
            return Err(DecodeError::BadIdSpec { id, name, reason: "id 0 is padding" });
        }
        if spec.arg_widths.iter().any(|w| *w == 0 || *w > 4) {
            return Err(DecodeError::BadIdSpec {
                id,
                name,
                reason: "argument widths must be 1-4 bytes",
            });
        }
        if spec.arg_bytes() > MAX_ARG_BYTES {
            return Err(DecodeError::BadIdSpec {
                id,
                name,
                reason: "arguments exceed 8 bytes",
            });
        }
        self.entries.insert(id, spec);
        Ok(())
    }

    /// Validates a table deserialized from JSON.
    ///
    /// # Errors
    ///
    /// Same rules as [`insert`](Self::insert).
    pub fn validate(&self) -> DecodeResult<()> {
        for (id, spec) in &self.entries {
            let mut checked = Self::new();
            checked.insert(*id, spec.name.clone(), &spec.arg_widths)?;
        }
        Ok(())
    }

    /// Longest possible record in bytes: one id plus the widest
    /// argument list, or 1 for an empty table.
    #[must_use]
    pub fn max_record_bytes(&self) -> usize {
        self.entries
            .values()
            .map(|spec| 1 + spec.arg_bytes())
            .max()
            .unwrap_or(1)
    }

    fn get(&self, id: u8) -> Option<&IdSpec> {
        self.entries.get(&id)
    }
}

/// One reconstructed record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceRecord {
    /// Wire identifier.
    pub id: u8,
    /// Name from the identifier table.
    pub name: String,
    /// Decoded arguments, big-endian per declared width.
    pub args: Vec<u32>,
}

/// Result of decoding one capture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceDecode {
    /// Start offset (into the cursor-rotated byte stream) the alignment
    /// search settled on.
    pub start_offset: usize,
    /// Records, oldest first.
    pub records: Vec<TraceRecord>,
    /// Bytes skipped over unrecognized identifiers after alignment.
    pub unknown_bytes: usize,
    /// Zero-fill bytes skipped (ring never wrapped past them).
    pub padding_bytes: usize,
}

/// Decodes a capture against an identifier table.
///
/// The ring is first rotated at the cursor so the oldest byte comes
/// first. The oldest bytes may be the tail of a record whose start was
/// overwritten, so every start offset up to the largest known record
/// length is tried and the one yielding the fewest unrecognized
/// identifiers wins (ties to the smallest offset).
#[must_use]
pub fn decode_trace(table: &IdTable, capture: &TraceCapture) -> TraceDecode {
    let mut rotated = Vec::with_capacity(capture.bytes.len());
    let cursor = (capture.cursor as usize).min(capture.bytes.len());
    rotated.extend_from_slice(&capture.bytes[cursor..]);
    rotated.extend_from_slice(&capture.bytes[..cursor]);

    let max_offset = table.max_record_bytes().min(rotated.len().max(1));
    let mut best: Option<(usize, Walk)> = None;
    for offset in 0..max_offset {
        let walk = walk_from(table, &rotated, offset);
        trace!(offset, unknown = walk.unknown_bytes, records = walk.records.len());
        let better = match &best {
            None => true,
            Some((_, incumbent)) => walk.unknown_bytes < incumbent.unknown_bytes,
        };
        if better {
            best = Some((offset, walk));
        }
    }

    let (start_offset, walk) = best.unwrap_or((0, Walk::default()));
    debug!(
        start_offset,
        records = walk.records.len(),
        unknown = walk.unknown_bytes,
        "trace alignment settled"
    );
    TraceDecode {
        start_offset,
        records: walk.records,
        unknown_bytes: walk.unknown_bytes,
        padding_bytes: walk.padding_bytes,
    }
}

#[derive(Default)]
struct Walk {
    records: Vec<TraceRecord>,
    unknown_bytes: usize,
    padding_bytes: usize,
}

fn walk_from(table: &IdTable, data: &[u8], offset: usize) -> Walk {
    let mut walk = Walk::default();
    let mut at = offset;
    while at < data.len() {
        let id = data[at];
        if id == ID_PADDING {
            walk.padding_bytes += 1;
            at += 1;
            continue;
        }
        let Some(spec) = table.get(id) else {
            walk.unknown_bytes += 1;
            at += 1;
            continue;
        };
        let args_end = at + 1 + spec.arg_bytes();
        if args_end > data.len() {
            // Partial record at the write cursor; expected when the ring
            // wrapped mid-record.
            break;
        }
        let mut args = Vec::with_capacity(spec.arg_widths.len());
        let mut arg_at = at + 1;
        for width in &spec.arg_widths {
            let mut value = 0_u32;
            for byte in &data[arg_at..arg_at + *width as usize] {
                value = (value << 8) | u32::from(*byte);
            }
            args.push(value);
            arg_at += *width as usize;
        }
        walk.records.push(TraceRecord {
            id,
            name: spec.name.clone(),
            args,
        });
        at = args_end;
    }
    walk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> IdTable {
        let mut t = IdTable::new();
        t.insert(0x01, "time.tick", &[4]).unwrap();
        t.insert(0x20, "motor.step", &[2, 1]).unwrap();
        t.insert(0x21, "motor.fault", &[4, 4]).unwrap();
        t.insert(0x30, "bus.event", &[]).unwrap();
        t
    }

    fn capture(bytes: Vec<u8>, cursor: u32) -> TraceCapture {
        TraceCapture { cursor, bytes }
    }

    #[test]
    fn table_validation_rejects_impossible_entries() {
        let mut t = IdTable::new();
        assert!(t.insert(0x00, "padding", &[]).is_err());
        assert!(t.insert(0x10, "wide", &[5]).is_err());
        assert!(t.insert(0x10, "zero", &[0]).is_err());
        assert!(t.insert(0x10, "fat", &[4, 4, 1]).is_err());
        assert!(t.insert(0x10, "ok", &[4, 4]).is_ok());
    }

    #[test]
    fn unwrapped_buffer_decodes_from_offset_zero() {
        // motor.step(0x0102, 3), bus.event, rest zero fill.
        let mut bytes = vec![0x20, 0x01, 0x02, 0x03, 0x30];
        bytes.resize(16, 0);
        let decode = decode_trace(&table(), &capture(bytes, 5));

        assert_eq!(decode.start_offset, 0);
        assert_eq!(decode.unknown_bytes, 0);
        assert_eq!(decode.padding_bytes, 11);
        assert_eq!(
            decode.records,
            vec![
                TraceRecord { id: 0x20, name: "motor.step".into(), args: vec![0x0102, 3] },
                TraceRecord { id: 0x30, name: "bus.event".into(), args: vec![] },
            ]
        );
    }

    #[test]
    fn wrapped_buffer_with_a_torn_record_realigns() {
        // Logical stream: ...motor.fault(a, b) | motor.step(x, y) |
        // time.tick(t)... with the ring capturing only the tail of the
        // motor.fault record. After rotation the stream starts with 3
        // stray payload bytes; offset 3 is the first clean alignment.
        let stream: Vec<u8> = vec![
            0xde, 0xad, 0xbe, // tail of an overwritten record's args
            0x20, 0x01, 0x02, 0x03, // motor.step(0x0102, 3)
            0x01, 0x00, 0x00, 0x10, 0x00, // time.tick(0x1000)
        ];
        // Cursor 0: the buffer is exactly the rotated stream.
        let decode = decode_trace(&table(), &capture(stream, 0));

        assert_eq!(decode.start_offset, 3);
        assert_eq!(decode.records.len(), 2);
        assert_eq!(decode.records[0].name, "motor.step");
        assert_eq!(decode.records[1].args, vec![0x1000]);
        assert_eq!(decode.unknown_bytes, 0);
    }

    #[test]
    fn rotation_honors_the_cursor() {
        // Storage order [pad, 05, 06, pad, pad, bus.event, step-id,
        // pad] with cursor 1: rotating yields [05 06 00 00 30 20 00 00],
        // stray argument bytes first, then a clean bus.event.
        let bytes = vec![0x00, 0x05, 0x06, 0x00, 0x00, 0x30, 0x20, 0x00];
        let decode = decode_trace(&table(), &capture(bytes, 1));
        assert!(decode.records.iter().any(|r| r.name == "bus.event"));
        assert_eq!(decode.unknown_bytes, 0, "alignment skips the stray bytes");
    }

    #[test]
    fn partial_record_at_the_cursor_is_dropped_silently() {
        // motor.fault needs 8 argument bytes; only 3 present.
        let bytes = vec![0x21, 0x01, 0x02, 0x03];
        let decode = decode_trace(&table(), &capture(bytes, 0));
        assert_eq!(decode.records, vec![]);
        assert_eq!(decode.unknown_bytes, 0);
    }

    #[test]
    fn unknown_ids_are_counted_not_fatal() {
        // The stray id sits past the alignment-search window, so no
        // offset can dodge it; decoding resynchronizes one byte later.
        let mut bytes = vec![0x30; 9];
        bytes.push(0x7f);
        bytes.push(0x30);
        let decode = decode_trace(&table(), &capture(bytes, 0));
        assert_eq!(decode.start_offset, 0);
        assert_eq!(decode.records.len(), 10);
        assert_eq!(decode.unknown_bytes, 1);
    }

    #[test]
    fn empty_capture_decodes_to_nothing() {
        let decode = decode_trace(&table(), &capture(vec![], 0));
        assert_eq!(decode.records, vec![]);
        assert_eq!(decode.start_offset, 0);
    }

    #[test]
    fn json_round_trip_preserves_the_table() {
        let t = table();
        let json = serde_json::to_string(&t).unwrap();
        let back: IdTable = serde_json::from_str(&json).unwrap();
        back.validate().unwrap();
        assert_eq!(t, back);
    }
}
