//! Manually advanced millisecond clock.

use std::cell::Cell;

use blackbox_hal::Monotonic;

/// A [`Monotonic`] whose time only moves when the test says so.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// A clock starting at the given time.
    #[must_use]
    pub fn at(now_ms: u32) -> Self {
        Self { now: Cell::new(now_ms) }
    }

    /// Moves time forward, wrapping like the hardware counter does.
    pub fn advance(&self, delta_ms: u32) {
        self.now.set(self.now.get().wrapping_add(delta_ms));
    }

    /// Jumps to an absolute time.
    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }
}

impl Monotonic for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_like_the_counter() {
        let clock = ManualClock::at(u32::MAX - 1);
        clock.advance(3);
        assert_eq!(clock.now_ms(), 1);
    }
}
