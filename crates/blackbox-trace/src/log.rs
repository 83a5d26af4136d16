//! Interrupt-safe shared front end over [`TraceBuffer`].

use core::cell::RefCell;

use critical_section::Mutex;

use crate::args::TraceArg;
use crate::buffer::{TraceBuffer, TraceSnapshot};
use crate::error::TraceResult;

/// Process-wide trace log, safe to call from interrupt handlers and the
/// main loop alike.
///
/// Every operation enters a nestable critical section that brackets the
/// whole multi-byte write, not just the cursor update, so a record from
/// the main loop can never be torn by one from an interrupt.
///
/// Const-constructible, so the firmware's single instance can live in a
/// `static`:
///
/// ```rust
/// use blackbox_trace::TraceLog;
///
/// static LOG: TraceLog<256> = TraceLog::new();
/// ```
#[derive(Debug)]
pub struct TraceLog<const N: usize> {
    inner: Mutex<RefCell<TraceBuffer<N>>>,
}

impl<const N: usize> TraceLog<N> {
    /// An empty, active log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(TraceBuffer::new())),
        }
    }

    /// Appends one record; a no-op while the log is inactive.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::ArgBudgetExceeded`](crate::TraceError::ArgBudgetExceeded)
    /// when the arguments total more than [`MAX_ARG_BYTES`](crate::MAX_ARG_BYTES).
    ///
    /// # Real-Time Safety
    ///
    /// Masks interrupts for the duration of the write; no allocation, no
    /// blocking. The critical section is the whole contract: `record`
    /// never skips or corrupts the cursor update.
    pub fn record(&self, id: u8, args: &[TraceArg]) -> TraceResult<()> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).record(id, args))
    }

    /// Activates or deactivates recording. Clears any armed countdown.
    pub fn set_active(&self, active: bool) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).set_active(active));
    }

    /// Arms an auto-disable countdown; see [`TraceBuffer::arm_countdown`].
    pub fn arm_countdown(&self, n: u32) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).arm_countdown(n));
    }

    /// Whether records are currently stored.
    #[must_use]
    pub fn is_active(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_active())
    }

    /// Current write cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).cursor())
    }

    /// Freezes the buffer and copies it out, the form the fault handler
    /// persists into the report.
    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot<N> {
        critical_section::with(|cs| self.inner.borrow_ref(cs).snapshot())
    }
}

impl<const N: usize> Default for TraceLog<N> {
    fn default() -> Self {
        Self::new()
    }
}
