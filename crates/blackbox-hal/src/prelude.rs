//! Prelude for blackbox-hal.
//!
//! Re-exports every trait and plain-data type a consuming crate needs.

pub use crate::clock::{Monotonic, elapsed_ms};
pub use crate::console::PanicConsole;
pub use crate::cpu::Cpu;
pub use crate::error::{HalError, HalResult};
pub use crate::mpu::{MemoryProtection, ProtectedRange};
pub use crate::registers::{EXCEPTION_FRAME_BYTES, ExceptionFrame, RamBounds, SystemRegisters};
pub use crate::reset::{ResetCause, ResetControl};
pub use crate::storage::{PanicStorage, WriteGrain};
pub use crate::watchdog::WatchdogTimer;
