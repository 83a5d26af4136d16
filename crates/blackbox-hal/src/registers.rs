//! Plain-data views of processor state captured during a fault.

/// Number of bytes in the hardware-saved exception entry frame.
pub const EXCEPTION_FRAME_BYTES: u32 = 32;

/// The eight words the processor pushes on exception entry, in stacking
/// order (lowest address first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct ExceptionFrame {
    /// r0 at the point the exception was taken.
    pub r0: u32,
    /// r1 at the point the exception was taken.
    pub r1: u32,
    /// r2 at the point the exception was taken.
    pub r2: u32,
    /// r3 at the point the exception was taken.
    pub r3: u32,
    /// r12 at the point the exception was taken.
    pub r12: u32,
    /// Link register at the point the exception was taken.
    pub lr: u32,
    /// Return address (the faulting or interrupted instruction).
    pub return_addr: u32,
    /// Program status register at the point the exception was taken.
    pub xpsr: u32,
}

impl ExceptionFrame {
    /// A frame with every field zeroed, used when the captured stack
    /// pointer is implausible and the real frame must not be read.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            r0: 0,
            r1: 0,
            r2: 0,
            r3: 0,
            r12: 0,
            lr: 0,
            return_addr: 0,
            xpsr: 0,
        }
    }
}

/// System control and fault status registers sampled in panic mode.
///
/// Field names follow the architecture manual; on targets where a register
/// does not exist the implementation reports zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct SystemRegisters {
    /// Interrupt program status register (active exception number).
    pub ipsr: u32,
    /// Interrupt control and state register.
    pub icsr: u32,
    /// System handler control and state register.
    pub shcsr: u32,
    /// Configurable fault status register.
    pub cfsr: u32,
    /// Hard fault status register.
    pub hfsr: u32,
    /// Memory management fault address register.
    pub mmfar: u32,
    /// Bus fault address register.
    pub bfar: u32,
}

/// Link-time RAM geometry used to judge whether a captured stack pointer
/// is safe to dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamBounds {
    /// Lowest address of ordinary RAM (start of the data section).
    pub ram_start: u32,
    /// One past the highest stack address (initial stack pointer).
    pub stack_top: u32,
}

impl RamBounds {
    /// True when a hardware-saved exception frame starting at `sp` would
    /// lie entirely inside RAM: `sp` is 8-byte aligned, at or above the
    /// RAM start, and leaves room for the frame plus one guard word below
    /// the stack top.
    #[must_use]
    pub fn holds_exception_frame(&self, sp: u32) -> bool {
        sp % 8 == 0
            && sp >= self.ram_start
            && sp
                .checked_add(EXCEPTION_FRAME_BYTES + 4)
                .is_some_and(|end| end <= self.stack_top)
    }
}
