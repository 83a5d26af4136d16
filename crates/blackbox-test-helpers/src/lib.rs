//! Host-side fakes for the `blackbox-hal` traits.
//!
//! Every trait the core consumes has a plain-memory stand-in here:
//! storage over a byte vector, a manually advanced clock, a console that
//! captures output, and recording fakes for the watchdog, protection
//! unit, CPU and reset control. Tests drive the real capture and
//! supervision logic against these and assert on what the hardware
//! would have been told to do.
//!
//! Test-support code: panicking on misuse is the point, so the
//! panic-hygiene lints are relaxed crate-wide.

#![warn(missing_docs, rust_2018_idioms)]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unreachable,
    clippy::arithmetic_side_effects
)]

mod clock;
mod console;
mod cpu;
mod mpu;
mod reset;
mod storage;
mod watchdog;

pub use clock::ManualClock;
pub use console::CaptureConsole;
pub use cpu::FakeCpu;
pub use mpu::FakeMpu;
pub use reset::{FakeReset, RESET_PANIC_MARKER};
pub use storage::MemStorage;
pub use watchdog::RecordingWatchdog;
