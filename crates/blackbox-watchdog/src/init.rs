//! Arming and retiring the initialization watchdog.
//!
//! Runs at the very start of startup, before most subsystems exist. The
//! failure count is incremented pessimistically the moment the watchdog
//! is armed and zeroed only once the full startup sequence reports
//! success, so a hang anywhere in between is counted without any code
//! having to run at the moment of failure.

use blackbox_hal::{ResetCause, WatchdogTimer};

use crate::config::SupervisorConfig;
use crate::persist::PersistedCounter;

/// Outcome of [`start_init_watchdog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum InitArm {
    /// The init watchdog is running; startup proceeds under its timeout.
    Armed {
        /// This boot's attempt number, counting from 1 since the last
        /// success.
        attempt: u32,
    },
    /// The failure ceiling was reached after repeated watchdog resets.
    /// The watchdog was not armed; the caller is expected to hang in a
    /// detectable state instead of rebooting forever.
    CeilingReached {
        /// Consecutive failed attempts recorded.
        failed_attempts: u32,
    },
}

/// Validates the persisted counter, applies the failure ceiling, and
/// arms the hardware watchdog with the init timeout.
///
/// The counter is cleared when the prior reset was not
/// watchdog-attributed: a power cycle or manual reset means the operator
/// intervened, so the retry budget starts over. The ceiling only binds
/// while the resets it counts are the watchdog's own.
pub fn start_init_watchdog<W: WatchdogTimer + ?Sized>(
    counter: &mut PersistedCounter,
    cause: ResetCause,
    config: &SupervisorConfig,
    hw: &mut W,
) -> InitArm {
    counter.validate_or_reset();
    if !cause.is_watchdog() {
        counter.clear();
    }

    let failed = counter.count();
    if config.init_failure_ceiling != 0
        && cause.is_watchdog()
        && failed >= config.init_failure_ceiling
    {
        return InitArm::CeilingReached { failed_attempts: failed };
    }

    counter.increment();
    hw.start(config.init_timeout_ms);
    InitArm::Armed { attempt: counter.count() }
}

/// Marks the startup sequence complete: zeroes the persisted failure
/// count. The caller then transitions the hardware watchdog to its
/// normal-operation timeout via the supervisor.
pub fn mark_init_successful(counter: &mut PersistedCounter) {
    counter.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubHw {
        started_with: Option<u32>,
    }

    impl WatchdogTimer for StubHw {
        fn start(&mut self, timeout_ms: u32) {
            self.started_with = Some(timeout_ms);
        }

        fn reload(&mut self) {}
    }

    fn config(ceiling: u32) -> SupervisorConfig {
        SupervisorConfig {
            init_timeout_ms: 3_000,
            init_failure_ceiling: ceiling,
            ..SupervisorConfig::default()
        }
    }

    #[test]
    fn first_boot_arms_with_attempt_one() {
        let mut counter = PersistedCounter::new();
        let mut hw = StubHw { started_with: None };
        let arm = start_init_watchdog(&mut counter, ResetCause::PowerOn, &config(3), &mut hw);
        assert_eq!(arm, InitArm::Armed { attempt: 1 });
        assert_eq!(hw.started_with, Some(3_000));
    }

    #[test]
    fn at_the_ceiling_after_watchdog_reset_nothing_is_armed() {
        let mut counter = PersistedCounter::new();
        for _ in 0..3 {
            counter.increment();
        }
        let mut hw = StubHw { started_with: None };
        let arm = start_init_watchdog(&mut counter, ResetCause::Watchdog, &config(3), &mut hw);
        assert_eq!(arm, InitArm::CeilingReached { failed_attempts: 3 });
        assert_eq!(hw.started_with, None);
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn external_reset_clears_the_count_and_arms() {
        let mut counter = PersistedCounter::new();
        for _ in 0..3 {
            counter.increment();
        }
        let mut hw = StubHw { started_with: None };
        let arm = start_init_watchdog(&mut counter, ResetCause::External, &config(3), &mut hw);
        assert_eq!(arm, InitArm::Armed { attempt: 1 });
        assert_eq!(hw.started_with, Some(3_000));
    }

    #[test]
    fn ceiling_zero_means_unlimited_retries() {
        let mut counter = PersistedCounter::new();
        for _ in 0..100 {
            counter.increment();
        }
        let mut hw = StubHw { started_with: None };
        let arm = start_init_watchdog(&mut counter, ResetCause::Watchdog, &config(0), &mut hw);
        assert_eq!(arm, InitArm::Armed { attempt: 101 });
    }

    #[test]
    fn success_resets_the_retry_budget() {
        let mut counter = PersistedCounter::new();
        let mut hw = StubHw { started_with: None };
        let _arm = start_init_watchdog(&mut counter, ResetCause::Watchdog, &config(3), &mut hw);
        mark_init_successful(&mut counter);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn repeated_watchdog_resets_walk_up_to_the_ceiling() {
        let mut counter = PersistedCounter::new();
        let mut hw = StubHw { started_with: None };
        for attempt in 1..=3 {
            let arm =
                start_init_watchdog(&mut counter, ResetCause::Watchdog, &config(3), &mut hw);
            assert_eq!(arm, InitArm::Armed { attempt });
        }
        let arm = start_init_watchdog(&mut counter, ResetCause::Watchdog, &config(3), &mut hw);
        assert_eq!(arm, InitArm::CeilingReached { failed_attempts: 3 });
    }
}
