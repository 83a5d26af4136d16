//! Convenience re-exports for watchdog supervisor users.

pub use crate::client::{ClientStatus, ClientTable, SweepOutcome};
pub use crate::config::SupervisorConfig;
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::init::{InitArm, mark_init_successful, start_init_watchdog};
pub use crate::persist::PersistedCounter;
pub use crate::supervisor::{Supervisor, TriggerHook};
