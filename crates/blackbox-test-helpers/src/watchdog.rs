//! Recording hardware-watchdog fake.

use blackbox_hal::WatchdogTimer;

/// A [`WatchdogTimer`] that records starts and reloads.
#[derive(Debug, Default)]
pub struct RecordingWatchdog {
    /// Timeout passed to the most recent start, if any.
    pub started_with: Option<u32>,
    /// Number of reloads since construction.
    pub reloads: u32,
}

impl RecordingWatchdog {
    /// A watchdog that has never been started.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WatchdogTimer for RecordingWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.started_with = Some(timeout_ms);
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}
