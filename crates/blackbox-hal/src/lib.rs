//! # blackbox-hal
//!
//! Hardware abstraction contracts for the Blackbox fault-capture and
//! automatic-recovery core.
//!
//! The crates above this one (trace log, watchdog supervisor, stack guard,
//! fault handler) are ordinary, testable code operating on plain data. Every
//! interaction with the processor or a peripheral goes through one of the
//! narrow traits defined here:
//!
//! - [`Monotonic`] - monotonically increasing millisecond clock
//! - [`WatchdogTimer`] - the hardware watchdog countdown primitive
//! - [`PanicStorage`] - the single reserved persistent-storage slot
//! - [`PanicConsole`] - polling, blocking character output
//! - [`ResetControl`] - reset-cause query and forced system reset
//! - [`MemoryProtection`] - program/disable one protection region
//! - [`Cpu`] - interrupt masking and raw register/frame capture
//!
//! Target firmware implements these traits over its registers (the handful
//! of intrinsic calls live inside those impls); host tests implement them
//! over plain memory. Nothing in this crate allocates or blocks.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod console;
pub mod cpu;
pub mod error;
pub mod mpu;
pub mod prelude;
pub mod registers;
pub mod reset;
pub mod storage;
pub mod watchdog;

pub use clock::{Monotonic, elapsed_ms};
pub use console::PanicConsole;
pub use cpu::Cpu;
pub use error::{HalError, HalResult};
pub use mpu::{MemoryProtection, ProtectedRange};
pub use registers::{ExceptionFrame, RamBounds, SystemRegisters};
pub use reset::{ResetCause, ResetControl};
pub use storage::{PanicStorage, WriteGrain};
pub use watchdog::WatchdogTimer;
