//! Interrupt masking and raw processor-state capture.

use crate::registers::{ExceptionFrame, SystemRegisters};

/// The handful of processor intrinsics the panic path needs.
///
/// Firmware implementations wrap the corresponding instructions and
/// memory-mapped registers; the `unsafe` lives inside those impls so the
/// capture and report logic above stays ordinary code on plain data.
pub trait Cpu {
    /// Mask all maskable interrupts. Not undone anywhere; panic mode lasts
    /// until reset.
    fn mask_interrupts(&mut self);

    /// Sample the system control and fault status registers.
    fn system_registers(&self) -> SystemRegisters;

    /// Copy the hardware-saved exception frame starting at `sp`.
    ///
    /// Callers must validate `sp` with
    /// [`RamBounds::holds_exception_frame`](crate::registers::RamBounds::holds_exception_frame)
    /// first; implementations dereference it without further checks.
    fn read_exception_frame(&self, sp: u32) -> ExceptionFrame;
}
