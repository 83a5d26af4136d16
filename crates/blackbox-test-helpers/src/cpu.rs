//! Recording CPU fake with canned register state.

use std::cell::RefCell;

use blackbox_hal::{Cpu, ExceptionFrame, SystemRegisters};

/// A [`Cpu`] that serves canned registers and records what was asked.
#[derive(Debug, Default)]
pub struct FakeCpu {
    /// Registers returned by [`Cpu::system_registers`].
    pub regs: SystemRegisters,
    /// Frame returned by [`Cpu::read_exception_frame`].
    pub frame: ExceptionFrame,
    /// Whether [`Cpu::mask_interrupts`] has been called.
    pub interrupts_masked: bool,
    frame_reads: RefCell<Vec<u32>>,
}

impl FakeCpu {
    /// A CPU with all-zero canned state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A CPU whose frame read will return `frame`.
    #[must_use]
    pub fn with_frame(frame: ExceptionFrame) -> Self {
        Self { frame, ..Self::default() }
    }

    /// Stack pointers handed to [`Cpu::read_exception_frame`] so far.
    #[must_use]
    pub fn frame_reads(&self) -> Vec<u32> {
        self.frame_reads.borrow().clone()
    }
}

impl Cpu for FakeCpu {
    fn mask_interrupts(&mut self) {
        self.interrupts_masked = true;
    }

    fn system_registers(&self) -> SystemRegisters {
        self.regs
    }

    fn read_exception_frame(&self, sp: u32) -> ExceptionFrame {
        self.frame_reads.borrow_mut().push(sp);
        self.frame
    }
}
