//! Section walk over a report image.

use serde::Serialize;
use tracing::debug;

use blackbox_fault::{
    FAULT_RECORD_WORDS, FaultRecord, SECTION_HEADER_BYTES, TAG_END, TAG_FAULT, TAG_TRACE,
};

use crate::error::{DecodeError, DecodeResult};

/// Byte order of the report's multi-byte header and record fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl ByteOrder {
    fn read_u32(self, bytes: &[u8]) -> u32 {
        let quad: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            Self::Little => u32::from_le_bytes(quad),
            Self::Big => u32::from_be_bytes(quad),
        }
    }

    /// Detects the byte order from the leading fault-section tag.
    fn detect(lead: &[u8]) -> DecodeResult<Self> {
        let quad: [u8; 4] = [lead[0], lead[1], lead[2], lead[3]];
        if u32::from_le_bytes(quad) == TAG_FAULT {
            Ok(Self::Little)
        } else if u32::from_be_bytes(quad) == TAG_FAULT {
            Ok(Self::Big)
        } else {
            Err(DecodeError::NotAReport { found: quad })
        }
    }
}

/// The fault record, flattened for human and JSON output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FaultSummary {
    /// Stable classification name.
    pub class: &'static str,
    /// Auxiliary parameter supplied by the failure source.
    pub param: u32,
    /// Hardware-saved frame registers `[r0, r1, r2, r3, r12]`.
    pub frame_regs: [u32; 5],
    /// Link register from the hardware-saved frame.
    pub frame_lr: u32,
    /// Return address (faulting or interrupted instruction).
    pub return_addr: u32,
    /// Program status register from the frame.
    pub xpsr: u32,
    /// Stack pointer captured at panic entry.
    pub sp: u32,
    /// Link register captured at panic entry.
    pub lr: u32,
    /// `[ipsr, icsr, shcsr, cfsr, hfsr, mmfar, bfar]`.
    pub system_regs: [u32; 7],
    /// Milliseconds since boot at capture time.
    pub uptime_ms: u32,
}

impl From<FaultRecord> for FaultSummary {
    fn from(record: FaultRecord) -> Self {
        Self {
            class: record.class.as_str(),
            param: record.param,
            frame_regs: [
                record.frame.r0,
                record.frame.r1,
                record.frame.r2,
                record.frame.r3,
                record.frame.r12,
            ],
            frame_lr: record.frame.lr,
            return_addr: record.frame.return_addr,
            xpsr: record.frame.xpsr,
            sp: record.sp,
            lr: record.lr,
            system_regs: [
                record.regs.ipsr,
                record.regs.icsr,
                record.regs.shcsr,
                record.regs.cfsr,
                record.regs.hfsr,
                record.regs.mmfar,
                record.regs.bfar,
            ],
            uptime_ms: record.uptime_ms,
        }
    }
}

/// The trace section as captured: a raw ring plus its cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceCapture {
    /// Write cursor at capture time (index of the oldest byte).
    pub cursor: u32,
    /// Ring contents in storage order.
    pub bytes: Vec<u8>,
}

/// A fully parsed report image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedReport {
    /// Byte order the image was written with.
    pub byte_order: ByteOrder,
    /// The fault record section.
    pub fault: FaultSummary,
    /// The trace snapshot section.
    pub trace: TraceCapture,
}

/// Parses a raw report image section-by-section.
///
/// Byte order is detected from the leading tag; sections are walked
/// strictly by their tag/length headers (lengths were rounded to the
/// storage grain by the writer, so no grain knowledge is needed here);
/// the walk must end at the sentinel.
///
/// # Errors
///
/// Any structural violation: unknown leading tag, truncated or
/// impossible section lengths, unknown section tags, a missing
/// sentinel, or an unparsable fault record.
pub fn decode_report(image: &[u8]) -> DecodeResult<DecodedReport> {
    if image.len() < SECTION_HEADER_BYTES {
        return Err(DecodeError::TruncatedSection {
            offset: 0,
            needed: SECTION_HEADER_BYTES,
            available: image.len(),
        });
    }
    let order = ByteOrder::detect(image)?;
    debug!(?order, image_len = image.len(), "walking report sections");

    let mut fault: Option<FaultSummary> = None;
    let mut trace: Option<TraceCapture> = None;
    let mut offset = 0_usize;

    loop {
        if offset + SECTION_HEADER_BYTES > image.len() {
            return Err(DecodeError::MissingSentinel);
        }
        let tag = order.read_u32(&image[offset..]);
        let len = order.read_u32(&image[offset + 4..]);
        if (len as usize) < SECTION_HEADER_BYTES {
            return Err(DecodeError::BadSectionLength { offset, len });
        }
        let len = len as usize;
        if offset + len > image.len() {
            return Err(DecodeError::TruncatedSection {
                offset,
                needed: len,
                available: image.len() - offset,
            });
        }
        let payload = &image[offset + SECTION_HEADER_BYTES..offset + len];

        if tag == TAG_FAULT {
            fault = Some(parse_fault_payload(order, payload, offset)?);
        } else if tag == TAG_TRACE {
            trace = Some(parse_trace_payload(order, payload)?);
        } else if tag == TAG_END {
            break;
        } else {
            return Err(DecodeError::UnknownTag { tag, offset });
        }
        offset += len;
    }

    Ok(DecodedReport {
        byte_order: order,
        fault: fault.ok_or(DecodeError::MissingSection { section: "fault" })?,
        trace: trace.ok_or(DecodeError::MissingSection { section: "trace" })?,
    })
}

fn parse_fault_payload(
    order: ByteOrder,
    payload: &[u8],
    offset: usize,
) -> DecodeResult<FaultSummary> {
    let needed = FAULT_RECORD_WORDS * 4;
    if payload.len() < needed {
        return Err(DecodeError::TruncatedSection {
            offset,
            needed: SECTION_HEADER_BYTES + needed,
            available: SECTION_HEADER_BYTES + payload.len(),
        });
    }
    let mut words = [0_u32; FAULT_RECORD_WORDS];
    for (i, word) in words.iter_mut().enumerate() {
        *word = order.read_u32(&payload[i * 4..]);
    }
    let record =
        FaultRecord::from_words(&words).ok_or(DecodeError::UnknownClass { class: words[0] })?;
    Ok(record.into())
}

fn parse_trace_payload(order: ByteOrder, payload: &[u8]) -> DecodeResult<TraceCapture> {
    if payload.len() < 8 {
        return Err(DecodeError::BadTraceSection);
    }
    let cursor = order.read_u32(payload);
    let capacity = order.read_u32(&payload[4..]) as usize;
    // Rounding may leave pad bytes after the ring; the capacity field is
    // authoritative.
    if capacity > payload.len() - 8 || (cursor as usize) > capacity {
        return Err(DecodeError::BadTraceSection);
    }
    Ok(TraceCapture {
        cursor,
        bytes: payload[8..8 + capacity].to_vec(),
    })
}
