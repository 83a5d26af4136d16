//! # blackbox-stack-guard
//!
//! Stack-overflow guard for the Blackbox fault-capture core: turns silent
//! corruption of the memory below the stack into a deterministic,
//! diagnosable memory-protection fault.
//!
//! Installed once at startup, before interrupts are enabled:
//!
//! 1. every word from the current stack pointer down through the guard
//!    region is filled with a distinctive sentinel pattern;
//! 2. the guard region - the minimum size the protection hardware
//!    supports, placed immediately adjacent to the reserved stack and
//!    fixed at link time - is programmed read-only and non-executable.
//!
//! Any store into the guard then raises a memory-protection exception,
//! which the fault handler classifies as a stack-guard violation by
//! checking the fault address against the guard bounds. The sentinel
//! fill additionally provides a high-water-mark diagnostic: scanning
//! upward from the bottom of the painted area, the first word that no
//! longer equals the sentinel marks the deepest stack use this boot.
//!
//! ## Known limitation
//!
//! A function that allocates a frame larger than the guard region and
//! never writes to its lowest words can step over the guard entirely.
//! This matches the protection hardware's granularity and is a documented
//! limitation, not corrected here.
//!
//! ## Modules
//!
//! - [`region`] - [`GuardRegion`], the validated link-time address range
//! - [`guard`] - sentinel painting and protection-unit installation
//! - [`watermark`] - high-water-mark scanning
//! - [`error`] - guard-specific error types

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod guard;
pub mod prelude;
pub mod region;
pub mod watermark;

pub use error::{GuardError, GuardResult};
pub use guard::{install, is_guard_violation, paint};
pub use region::{GuardRegion, MIN_GUARD_BYTES, SENTINEL};
pub use watermark::{HighWaterMark, scan};
