//! Polling character output for panic mode.

/// Blocking, polling byte output.
///
/// This is the only I/O primitive the panic path is allowed to touch: it
/// must work with interrupts fully disabled and with no reliance on DMA or
/// interrupt-driven buffering. Implementations spin on the transmit-ready
/// flag. Slow is fine; the hardware watchdog has been reloaded before any
/// output starts.
pub trait PanicConsole {
    /// Write all of `bytes`, blocking until the hardware has accepted them.
    fn write_bytes(&mut self, bytes: &[u8]);
}
