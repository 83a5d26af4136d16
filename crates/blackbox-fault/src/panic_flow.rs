//! The ordered capture-and-reset sequence every failure source enters.
//!
//! Three entry points converge here: an explicit report call, the
//! exception trampoline, and the watchdog trigger hook. All three build
//! a [`PanicContext`] and hand control to [`PanicFlow::handle`], which
//! never returns.
//!
//! The trampoline itself is target code outside this crate: a few
//! instructions that capture the pre-exception stack pointer, force the
//! active stack pointer to the top of the reserved stack (the live call
//! chain may be corrupted), and jump - not call - in. Everything after
//! that jump is the ordinary code in this module, which is why the
//! sequence is testable on the host through [`PanicFlow::execute`].

use blackbox_hal::{
    Cpu, ExceptionFrame, MemoryProtection, Monotonic, PanicConsole, PanicStorage, RamBounds,
    ResetControl, WatchdogTimer,
};

use crate::class::FaultClass;
use crate::record::FaultRecord;
use crate::report::{ReportSummary, ReportWriter};

/// Borrowed hardware surface for one pass through the panic path.
///
/// Trait objects, not generics: the panic path is cold, monomorphized
/// size matters more than call overhead, and the firmware builds this
/// once from its singletons.
pub struct PanicHal<'a> {
    /// Interrupt masking and raw register capture.
    pub cpu: &'a mut dyn Cpu,
    /// The hardware watchdog, fed once so diagnostics can finish.
    pub watchdog: &'a mut dyn WatchdogTimer,
    /// The protection unit, disabled to avoid secondary faults.
    pub mpu: &'a mut dyn MemoryProtection,
    /// The reserved report slot.
    pub storage: &'a mut dyn PanicStorage,
    /// Polling console for the unconditional hex echo.
    pub console: &'a mut dyn PanicConsole,
    /// Forced system reset.
    pub reset: &'a mut dyn ResetControl,
    /// Uptime source for the report timestamp.
    pub clock: &'a dyn Monotonic,
}

impl core::fmt::Debug for PanicHal<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PanicHal").finish_non_exhaustive()
    }
}

/// What the entry point knows about the failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanicContext {
    /// Classification of the failure source.
    pub class: FaultClass,
    /// Auxiliary parameter (report code, exception number, stalled
    /// client id, or fault address).
    pub param: u32,
    /// Pre-exception stack pointer, when the entry point had one;
    /// anything implausible is tolerated.
    pub sp: u32,
    /// Link register at entry.
    pub lr: u32,
}

impl PanicContext {
    /// Context for a direct report call, where no exception state
    /// exists.
    #[must_use]
    pub const fn reported(code: u32) -> Self {
        Self {
            class: FaultClass::Reported,
            param: code,
            sp: 0,
            lr: 0,
        }
    }

    /// Context for a watchdog trigger, carrying the stalled client id.
    #[must_use]
    pub const fn watchdog_timeout(client_id: u32) -> Self {
        Self {
            class: FaultClass::WatchdogTimeout,
            param: client_id,
            sp: 0,
            lr: 0,
        }
    }
}

/// The common handler: capture, report, reset.
#[derive(Clone, Copy, Debug)]
pub struct PanicFlow {
    ram: RamBounds,
}

impl PanicFlow {
    /// A flow judging stack pointers against the given RAM geometry.
    #[must_use]
    pub const fn new(ram: RamBounds) -> Self {
        Self { ram }
    }

    /// Runs the capture sequence and returns what it accomplished.
    ///
    /// Strictly ordered; see the crate docs. Everything except the final
    /// reset, so hosts can assert on the outcome. Target code calls
    /// [`handle`](Self::handle) instead.
    pub fn execute(
        &self,
        hal: &mut PanicHal<'_>,
        ctx: PanicContext,
        trace_cursor: u32,
        trace_bytes: &[u8],
    ) -> ReportSummary {
        hal.cpu.mask_interrupts();
        hal.watchdog.reload();
        hal.mpu.disable();

        let frame = if self.ram.holds_exception_frame(ctx.sp) {
            hal.cpu.read_exception_frame(ctx.sp)
        } else {
            ExceptionFrame::zeroed()
        };

        let record = FaultRecord {
            class: ctx.class,
            param: ctx.param,
            frame,
            sp: ctx.sp,
            lr: ctx.lr,
            regs: hal.cpu.system_registers(),
            uptime_ms: hal.clock.now_ms(),
        };

        ReportWriter::new(hal.storage.write_grain()).write(
            hal.storage,
            hal.console,
            &record,
            trace_cursor,
            trace_bytes,
        )
    }

    /// The full panic path: capture, report, forced reset. Never
    /// returns.
    pub fn handle(
        &self,
        hal: &mut PanicHal<'_>,
        ctx: PanicContext,
        trace_cursor: u32,
        trace_bytes: &[u8],
    ) -> ! {
        let _summary = self.execute(hal, ctx, trace_cursor, trace_bytes);
        hal.reset.system_reset()
    }
}
