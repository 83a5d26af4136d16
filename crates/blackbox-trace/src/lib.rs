//! # blackbox-trace
//!
//! Low-overhead circular binary trace log for the Blackbox fault-capture
//! core.
//!
//! Records are compact: a one-byte identifier followed by 0-8 argument
//! bytes, each argument truncated to a caller-declared width and stored
//! most-significant-byte first. The buffer is a fixed-capacity byte ring
//! with a single write cursor; writes wrap byte-by-byte with no record
//! boundaries preserved across the wrap point. A record straddling the
//! cursor at capture time may therefore be partially overwritten - that is
//! a documented property of the format, and the offline decoder recovers
//! alignment without any help from the log.
//!
//! ## Modules
//!
//! - [`args`] - [`TraceArg`] width-declared argument values
//! - [`ids`] - identifier space partitioning ([`IdRange`])
//! - [`buffer`] - [`TraceBuffer`] ring storage and [`TraceSnapshot`]
//! - [`log`] - [`TraceLog`], the interrupt-safe shared front end
//! - [`error`] - trace-specific error types
//!
//! ## Real-Time Safety
//!
//! [`TraceLog::record`] is designed to be callable indistinguishably from
//! interrupt handlers and from the main loop: it masks interrupts for the
//! whole multi-byte write, performs no allocation, and never blocks.
//!
//! ## Example
//!
//! ```rust
//! use blackbox_trace::prelude::*;
//!
//! static LOG: TraceLog<64> = TraceLog::new();
//!
//! const ID_MOTOR: u8 = ID_FIRST_ASSIGNABLE;
//!
//! LOG.record(ID_MOTOR, &[TraceArg::u16(0x1234), TraceArg::u8(7)]).unwrap();
//!
//! let snap = LOG.snapshot();
//! assert_eq!(snap.cursor(), 4);
//! assert_eq!(&snap.bytes()[..4], &[ID_MOTOR, 0x12, 0x34, 0x07]);
//! ```

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod args;
pub mod buffer;
pub mod error;
pub mod ids;
pub mod log;
pub mod prelude;

pub use args::{MAX_ARG_BYTES, MAX_RECORD_BYTES, TraceArg};
pub use buffer::{TraceBuffer, TraceSnapshot};
pub use error::{TraceError, TraceResult};
pub use ids::{ID_FIRST_ASSIGNABLE, ID_INVALID, ID_TIME_TICK, IdRange};
pub use log::TraceLog;
