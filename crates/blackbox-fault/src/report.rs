//! Section-tagged report writing.
//!
//! The persisted/streamed report is a sequence of sections, each
//! `{tag: 4 bytes, length-including-header: 4 bytes, payload}`. Header
//! fields are little-endian; lengths are rounded up to the storage write
//! grain, padded with zeroes, so the parser never needs to know the
//! grain. Three sections, in order: fault record, trace-log snapshot,
//! zero-payload terminating sentinel.
//!
//! Every byte of the image goes to the hex console unconditionally; the
//! storage copy is skipped when the slot already holds an unconsumed
//! report, so the first fault after a clear wins the slot and later
//! faults do not wear the flash.

use heapless::Vec;

use blackbox_hal::{PanicConsole, PanicStorage, WriteGrain};

use crate::hex::HexWriter;
use crate::record::{FAULT_RECORD_BYTES, FaultRecord};

/// Tag of the fault-record section; also the slot-occupied marker.
pub const TAG_FAULT: u32 = u32::from_le_bytes(*b"FBX1");

/// Tag of the trace-log snapshot section.
pub const TAG_TRACE: u32 = u32::from_le_bytes(*b"TRC1");

/// Tag of the zero-payload terminating sentinel section.
pub const TAG_END: u32 = u32::from_le_bytes(*b"END0");

/// Bytes in a section header: tag plus length.
pub const SECTION_HEADER_BYTES: usize = 8;

/// Bytes preceding the raw trace bytes in the trace section payload:
/// the captured cursor and the buffer capacity.
pub const TRACE_PAYLOAD_HEADER_BYTES: usize = 8;

/// Marker line emitted on the console when a storage operation fails
/// mid-report.
const STORAGE_ERROR_MARKER: &[u8] = b"!STORAGE-WRITE-FAILED";

/// What the report writer accomplished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct ReportSummary {
    /// Whether the storage copy was attempted (slot was free).
    pub slot_written: bool,
    /// Total image size in bytes, padding included.
    pub bytes: usize,
    /// Storage operations that failed and were pushed past.
    pub storage_errors: u32,
}

impl ReportSummary {
    /// True when a complete report reached persistent storage.
    #[must_use]
    pub const fn persisted(&self) -> bool {
        self.slot_written && self.storage_errors == 0
    }
}

/// Writes one complete report image to storage and console.
#[derive(Clone, Copy, Debug)]
pub struct ReportWriter {
    grain: WriteGrain,
}

impl ReportWriter {
    /// A writer for the given storage write grain.
    #[must_use]
    pub const fn new(grain: WriteGrain) -> Self {
        Self { grain }
    }

    /// Emits the full section sequence.
    ///
    /// Storage failures never abort the sequence: they are counted,
    /// marked on the console, and the remaining bytes still go out -
    /// the overriding goal is reaching reset with as much of the report
    /// delivered as possible.
    pub fn write(
        &self,
        storage: &mut dyn PanicStorage,
        console: &mut dyn PanicConsole,
        record: &FaultRecord,
        trace_cursor: u32,
        trace_bytes: &[u8],
    ) -> ReportSummary {
        let mut early_errors = 0_u32;
        let store = match slot_holds_report(storage) {
            Ok(present) => !present,
            Err(_) => {
                early_errors += 1;
                false
            }
        };
        if store && storage.erase().is_err() {
            early_errors += 1;
        }

        let mut stream = SectionStream {
            storage,
            hex: HexWriter::new(console),
            grain: self.grain,
            offset: 0,
            chunk: Vec::new(),
            store,
            section_end: 0,
            errors: early_errors,
        };

        stream.begin_section(TAG_FAULT, FAULT_RECORD_BYTES);
        for word in record.to_words() {
            stream.push_all(&word.to_le_bytes());
        }
        stream.end_section();

        stream.begin_section(
            TAG_TRACE,
            TRACE_PAYLOAD_HEADER_BYTES + trace_bytes.len(),
        );
        stream.push_all(&trace_cursor.to_le_bytes());
        stream.push_all(&(trace_bytes.len() as u32).to_le_bytes());
        stream.push_all(trace_bytes);
        stream.end_section();

        stream.begin_section(TAG_END, 0);
        stream.end_section();

        stream.finish(store)
    }
}

/// Whether the reserved slot already holds an unconsumed report, judged
/// by the leading fault-section tag.
///
/// # Errors
///
/// Propagates the storage read failure.
pub(crate) fn slot_holds_report(
    storage: &dyn PanicStorage,
) -> Result<bool, blackbox_hal::HalError> {
    let mut lead = [0_u8; 4];
    storage.read(0, &mut lead)?;
    Ok(lead == TAG_FAULT.to_le_bytes())
}

/// Streams section bytes to storage (grain-sized chunks) and the hex
/// console (every byte, always).
struct SectionStream<'a> {
    storage: &'a mut dyn PanicStorage,
    hex: HexWriter<'a>,
    grain: WriteGrain,
    offset: usize,
    chunk: Vec<u8, 16>,
    store: bool,
    section_end: usize,
    errors: u32,
}

impl SectionStream<'_> {
    /// Emits a section header; `payload_len` is the unpadded payload
    /// size, and the recorded length is the grain-rounded total.
    fn begin_section(&mut self, tag: u32, payload_len: usize) {
        let rounded = self.grain.round_up(SECTION_HEADER_BYTES + payload_len);
        self.section_end = self.offset + self.chunk.len() + rounded;
        self.push_all(&tag.to_le_bytes());
        self.push_all(&(rounded as u32).to_le_bytes());
    }

    /// Zero-pads to the rounded section length.
    fn end_section(&mut self) {
        while self.offset + self.chunk.len() < self.section_end {
            self.push(0);
        }
    }

    fn push(&mut self, byte: u8) {
        self.hex.push(byte);
        // Capacity is 16, the largest grain, and full chunks flush
        // immediately; the push cannot fail.
        let pushed = self.chunk.push(byte);
        debug_assert!(pushed.is_ok());
        if self.chunk.len() == self.grain.bytes() {
            self.flush_chunk();
        }
    }

    fn push_all(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.push(*byte);
        }
    }

    fn flush_chunk(&mut self) {
        if self.store && self.storage.write(self.offset, &self.chunk).is_err() {
            self.errors += 1;
            self.hex.marker(STORAGE_ERROR_MARKER);
        }
        self.offset += self.chunk.len();
        self.chunk.clear();
    }

    fn finish(mut self, attempted: bool) -> ReportSummary {
        // Sections are grain multiples, so nothing should remain; if it
        // does, pad out the final row rather than drop it.
        if !self.chunk.is_empty() {
            while self.chunk.len() < self.grain.bytes() {
                self.hex.push(0);
                // Same capacity argument as in push.
                let pushed = self.chunk.push(0);
                debug_assert!(pushed.is_ok());
            }
            self.flush_chunk();
        }
        self.hex.finish();
        ReportSummary {
            slot_written: attempted,
            bytes: self.offset,
            storage_errors: self.errors,
        }
    }
}
