//! Monotonic millisecond time source.

/// A monotonically increasing millisecond counter.
///
/// The counter is free-running and wraps at `u32::MAX`; consumers must
/// compare timestamps with [`elapsed_ms`] rather than direct subtraction.
/// Firmware typically backs this with the SysTick-driven tick counter of
/// its timer service.
pub trait Monotonic {
    /// Current time in milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u32;
}

/// Wrap-safe elapsed time between two [`Monotonic`] timestamps.
///
/// Correct for any single wrap of the underlying counter, which at one tick
/// per millisecond means intervals of up to ~49.7 days.
#[must_use]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_without_wrap() {
        assert_eq!(elapsed_ms(1500, 1000), 500);
        assert_eq!(elapsed_ms(1000, 1000), 0);
    }

    #[test]
    fn elapsed_across_wrap() {
        assert_eq!(elapsed_ms(5, u32::MAX - 4), 10);
    }
}
