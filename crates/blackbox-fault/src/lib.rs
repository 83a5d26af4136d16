//! # blackbox-fault
//!
//! The convergence point of the Blackbox core: every failure source -
//! explicit reports of invariant violations, unhandled processor
//! exceptions (including stack-guard violations), software and hardware
//! watchdog timeouts - feeds one deterministic capture-and-reset
//! sequence.
//!
//! The sequence, strictly ordered: mask all interrupts; feed the
//! hardware watchdog once so the slow diagnostic work below cannot be
//! pre-empted by an uncontrolled reset; disable the memory-protection
//! unit so touching diagnostic addresses cannot raise a secondary fault;
//! populate the fault record from processor and system registers,
//! copying the hardware-saved exception frame only when the captured
//! stack pointer is plausible; persist the section-tagged report to the
//! reserved storage slot unless it already holds an unconsumed one,
//! while unconditionally echoing the same bytes hex-encoded over the
//! polling console; finally force a system reset. No path returns.
//!
//! There is no local recovery anywhere here: "recovery" means capture
//! what you can, then reset. Storage write failures are the one
//! tolerated error - they are counted and echoed past, because reaching
//! reset still matters more than the persisted copy.
//!
//! ## Modules
//!
//! - [`class`] - the closed classification of fault causes
//! - [`record`] - [`FaultRecord`], the fixed 20-word register capture
//! - [`report`] - section-tagged report writing ([`ReportWriter`])
//! - [`hex`] - polling-console hex echo, no runtime formatting
//! - [`panic_flow`] - [`PanicFlow`], the ordered capture sequence
//! - [`diag`] - read/clear surface for the persisted report
//! - [`error`] - diagnostic-surface error types

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod class;
pub mod diag;
pub mod error;
pub mod hex;
pub mod panic_flow;
pub mod prelude;
pub mod record;
pub mod report;

pub use class::FaultClass;
pub use diag::{clear_report, read_report, report_len, report_present};
pub use error::{FaultError, FaultResult};
pub use hex::HexWriter;
pub use panic_flow::{PanicContext, PanicFlow, PanicHal};
pub use record::{FAULT_RECORD_BYTES, FAULT_RECORD_WORDS, FaultRecord};
pub use report::{
    ReportSummary, ReportWriter, SECTION_HEADER_BYTES, TAG_END, TAG_FAULT, TAG_TRACE,
};
