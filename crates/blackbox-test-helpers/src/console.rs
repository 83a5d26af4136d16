//! Output-capturing console.

use blackbox_hal::PanicConsole;

/// A [`PanicConsole`] that accumulates everything written to it.
#[derive(Debug, Default)]
pub struct CaptureConsole {
    bytes: Vec<u8>,
}

impl CaptureConsole {
    /// An empty capture buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Everything written so far, as text. Panics on invalid UTF-8,
    /// which the hex echo never produces.
    #[must_use]
    pub fn as_text(&self) -> &str {
        core::str::from_utf8(&self.bytes).expect("console output was not UTF-8")
    }
}

impl PanicConsole for CaptureConsole {
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}
