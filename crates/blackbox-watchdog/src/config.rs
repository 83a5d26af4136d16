//! Supervisor timing parameters.

use crate::error::{WatchdogError, WatchdogResult};

/// Timing parameters for the watchdog supervisor.
///
/// Plain data with a [`validate`](Self::validate) step; the supervisor
/// refuses to run on a configuration that cannot provide layered
/// protection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Period of the software watchdog sweep. Must be smaller than the
    /// smallest client period, and smaller than the hardware timeout so
    /// a healthy system reloads in time.
    pub sweep_interval_ms: u32,
    /// Hardware watchdog timeout during normal operation.
    pub hardware_timeout_ms: u32,
    /// Hardware watchdog timeout covering the startup sequence.
    pub init_timeout_ms: u32,
    /// Consecutive failed initializations tolerated before the device
    /// stops re-arming and hangs. `0` means unlimited retries.
    pub init_failure_ceiling: u32,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            sweep_interval_ms: 10,
            hardware_timeout_ms: 100,
            init_timeout_ms: 3_000,
            init_failure_ceiling: 0,
        }
    }
}

impl SupervisorConfig {
    /// Checks the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidConfig`] naming the first
    /// violated constraint.
    pub const fn validate(&self) -> WatchdogResult<()> {
        if self.sweep_interval_ms == 0 {
            return Err(WatchdogError::InvalidConfig {
                reason: "sweep interval must be nonzero",
            });
        }
        if self.hardware_timeout_ms <= self.sweep_interval_ms {
            return Err(WatchdogError::InvalidConfig {
                reason: "hardware timeout must exceed the sweep interval",
            });
        }
        if self.init_timeout_ms == 0 {
            return Err(WatchdogError::InvalidConfig {
                reason: "init timeout must be nonzero",
            });
        }
        Ok(())
    }
}
