//! Hardware watchdog countdown primitive.

/// The raw hardware watchdog timer.
///
/// Once started the countdown cannot be stopped; if [`reload`] is not
/// called within the configured timeout the hardware resets the processor
/// with no software involvement. The supervisor layers its per-client
/// software watchdogs on top of this primitive and is the only module that
/// reloads it during normal operation; the fault handler reloads it once
/// more at the start of the panic sequence to buy time for capture.
///
/// [`reload`]: WatchdogTimer::reload
pub trait WatchdogTimer {
    /// Start the countdown with the given timeout.
    ///
    /// Implementations clamp the timeout to the hardware's representable
    /// range (typically a few seconds). Calling `start` on an already
    /// running watchdog reprograms the timeout where the hardware allows
    /// it and is otherwise a no-op.
    fn start(&mut self, timeout_ms: u32);

    /// Reload the countdown to its full timeout.
    fn reload(&mut self);
}
