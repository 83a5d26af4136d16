//! Convenience re-exports for the fault handler surface.

pub use crate::class::FaultClass;
pub use crate::diag::{clear_report, read_report, report_len, report_present};
pub use crate::error::{FaultError, FaultResult};
pub use crate::panic_flow::{PanicContext, PanicFlow, PanicHal};
pub use crate::record::{FAULT_RECORD_BYTES, FAULT_RECORD_WORDS, FaultRecord};
pub use crate::report::{ReportSummary, ReportWriter, TAG_END, TAG_FAULT, TAG_TRACE};
