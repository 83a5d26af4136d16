//! Reset-control fake.

use blackbox_hal::{ResetCause, ResetControl};

/// Panic message used to observe a forced reset from a test.
///
/// [`FakeReset::system_reset`] cannot return, so it panics with this
/// marker; tests wrap the call in `std::panic::catch_unwind` and check
/// the payload.
pub const RESET_PANIC_MARKER: &str = "forced system reset";

/// A [`ResetControl`] with a settable cause and an observable reset.
#[derive(Debug)]
pub struct FakeReset {
    /// Cause reported for the most recent reset.
    pub cause: ResetCause,
}

impl FakeReset {
    /// Reset control reporting the given cause.
    #[must_use]
    pub fn with_cause(cause: ResetCause) -> Self {
        Self { cause }
    }
}

impl Default for FakeReset {
    fn default() -> Self {
        Self::with_cause(ResetCause::PowerOn)
    }
}

impl ResetControl for FakeReset {
    fn reset_cause(&self) -> ResetCause {
        self.cause
    }

    fn system_reset(&mut self) -> ! {
        panic!("{RESET_PANIC_MARKER}");
    }
}
