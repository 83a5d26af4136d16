//! # blackbox-watchdog
//!
//! Layered watchdog supervisor for the Blackbox fault-capture core.
//!
//! Many software watchdogs - one per registered client module - are
//! backed by one hardware watchdog. A periodic sweep walks every client
//! with a nonzero period; if any client's elapsed-since-feed exceeds its
//! period the sweep diverges into the fault handler, and only a fully
//! healthy sweep reloads the hardware watchdog. The hardware watchdog
//! therefore keeps running only while (a) the sweep itself executes on
//! schedule and (b) every registered client is healthy; a stalled
//! scheduler starves it and it fires on its own.
//!
//! A separate initialization watchdog covers startup, before most
//! subsystems exist. Its consecutive-failure count lives in a
//! checksum-validated record in no-init memory, so it survives the very
//! resets it causes; past a configured ceiling the device stops
//! re-arming and hangs, converting an infinite silent reboot loop into
//! a detectable stuck state.
//!
//! ## Modules
//!
//! - [`client`] - the software watchdog table and sweep
//! - [`supervisor`] - ties clock, table and hardware watchdog together
//! - [`config`] - [`SupervisorConfig`] timing parameters
//! - [`persist`] - the reset-surviving failure counter
//! - [`init`] - arming and retiring the initialization watchdog
//! - [`error`] - supervisor error types
//!
//! ## Real-Time Safety
//!
//! [`ClientTable::feed`] is a single atomic timestamp store, callable
//! from interrupt handlers. The residual race of a feed against a
//! concurrent sweep read is accepted: a missed feed delays detection by
//! one sweep interval, it never causes a false trigger.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "std")]
extern crate std;

pub mod client;
pub mod config;
pub mod error;
pub mod init;
pub mod persist;
pub mod prelude;
pub mod supervisor;

pub use client::{ClientStatus, ClientTable, SweepOutcome};
pub use config::SupervisorConfig;
pub use error::{WatchdogError, WatchdogResult};
pub use init::{InitArm, mark_init_successful, start_init_watchdog};
pub use persist::PersistedCounter;
pub use supervisor::{Supervisor, TriggerHook};
