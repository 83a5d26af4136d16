//! The fixed-layout register capture persisted on every fault.

use blackbox_hal::{ExceptionFrame, SystemRegisters};

use crate::class::FaultClass;

/// Words in the persisted fault record.
pub const FAULT_RECORD_WORDS: usize = 20;

/// Bytes in the persisted fault record.
pub const FAULT_RECORD_BYTES: usize = FAULT_RECORD_WORDS * 4;

/// Everything captured about one fault, as plain data.
///
/// The word layout (see [`to_words`](Self::to_words)) is the wire
/// format; reordering fields there breaks every previously persisted
/// report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultRecord {
    /// Why the panic path was entered.
    pub class: FaultClass,
    /// Auxiliary parameter supplied by the failure source.
    pub param: u32,
    /// Hardware-saved exception entry frame, or all zeroes when the
    /// captured stack pointer was not plausible.
    pub frame: ExceptionFrame,
    /// Stack pointer captured at entry to the panic path.
    pub sp: u32,
    /// Link register captured at entry to the panic path.
    pub lr: u32,
    /// Processor status and fault/status registers.
    pub regs: SystemRegisters,
    /// Milliseconds since boot at capture time.
    pub uptime_ms: u32,
}

impl FaultRecord {
    /// Serializes into the fixed word layout.
    #[must_use]
    pub const fn to_words(&self) -> [u32; FAULT_RECORD_WORDS] {
        [
            self.class.as_raw(),
            self.param,
            self.frame.r0,
            self.frame.r1,
            self.frame.r2,
            self.frame.r3,
            self.frame.r12,
            self.frame.lr,
            self.frame.return_addr,
            self.frame.xpsr,
            self.sp,
            self.lr,
            self.regs.ipsr,
            self.regs.icsr,
            self.regs.shcsr,
            self.regs.cfsr,
            self.regs.hfsr,
            self.regs.mmfar,
            self.regs.bfar,
            self.uptime_ms,
        ]
    }

    /// Deserializes from the fixed word layout.
    ///
    /// Returns `None` when the classification word is not a known
    /// [`FaultClass`] - the offline decoder's first sanity check.
    #[must_use]
    pub const fn from_words(words: &[u32; FAULT_RECORD_WORDS]) -> Option<Self> {
        let Some(class) = FaultClass::from_raw(words[0]) else {
            return None;
        };
        Some(Self {
            class,
            param: words[1],
            frame: ExceptionFrame {
                r0: words[2],
                r1: words[3],
                r2: words[4],
                r3: words[5],
                r12: words[6],
                lr: words[7],
                return_addr: words[8],
                xpsr: words[9],
            },
            sp: words[10],
            lr: words[11],
            regs: SystemRegisters {
                ipsr: words[12],
                icsr: words[13],
                shcsr: words[14],
                cfsr: words[15],
                hfsr: words[16],
                mmfar: words[17],
                bfar: words[18],
            },
            uptime_ms: words[19],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FaultRecord {
        FaultRecord {
            class: FaultClass::Exception,
            param: 0xbeef,
            frame: ExceptionFrame {
                r0: 1,
                r1: 2,
                r2: 3,
                r3: 4,
                r12: 12,
                lr: 0xffff_fff9,
                return_addr: 0x0800_1234,
                xpsr: 0x2100_0003,
            },
            sp: 0x2000_7f00,
            lr: 0x0800_0400,
            regs: SystemRegisters {
                ipsr: 3,
                icsr: 0x0080_0003,
                shcsr: 0x0007_0000,
                cfsr: 0x0000_8200,
                hfsr: 0x4000_0000,
                mmfar: 0x2000_0010,
                bfar: 0,
            },
            uptime_ms: 123_456,
        }
    }

    #[test]
    fn word_layout_is_fixed() {
        let words = sample().to_words();
        assert_eq!(words[0], FaultClass::Exception.as_raw());
        assert_eq!(words[1], 0xbeef);
        assert_eq!(words[8], 0x0800_1234, "return address is word 8");
        assert_eq!(words[10], 0x2000_7f00, "sp is word 10");
        assert_eq!(words[15], 0x0000_8200, "cfsr is word 15");
        assert_eq!(words[19], 123_456, "uptime is the last word");
    }

    #[test]
    fn words_round_trip() {
        let record = sample();
        assert_eq!(FaultRecord::from_words(&record.to_words()), Some(record));
    }

    #[test]
    fn unknown_class_word_fails_parsing() {
        let mut words = sample().to_words();
        words[0] = 0x99;
        assert_eq!(FaultRecord::from_words(&words), None);
    }
}
