//! # blackbox-decoder
//!
//! Offline decoder for the persisted/streamed fault-report format and
//! the circular trace captures inside it.
//!
//! Two problems the on-target writer deliberately leaves to this side:
//!
//! - **Byte order.** Report header fields share one fixed byte order;
//!   which one is auto-detected by trying both against the leading
//!   fault-section tag.
//! - **Trace alignment.** A captured trace buffer is a byte ring with no
//!   record boundaries: the logical start (the cursor) is known, but the
//!   oldest bytes may belong to a record that was partially overwritten.
//!   The decoder searches candidate start offsets, bounded by the
//!   largest known record length, and keeps the one that minimizes
//!   unrecognized identifiers.
//!
//! Inputs are either the raw slot image or a hex dump captured from the
//! panic console ([`hexdump`]).
//!
//! ## Modules
//!
//! - [`report`] - section walk and [`DecodedReport`]
//! - [`trace`] - [`IdTable`] and the alignment search
//! - [`hexdump`] - console hex-dump ingestion
//! - [`error`] - decode error types

#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod hexdump;
pub mod report;
pub mod trace;

pub use error::{DecodeError, DecodeResult};
pub use hexdump::parse_hex_dump;
pub use report::{ByteOrder, DecodedReport, FaultSummary, TraceCapture, decode_report};
pub use trace::{IdSpec, IdTable, TraceDecode, TraceRecord, decode_trace};
