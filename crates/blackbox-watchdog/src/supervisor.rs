//! Ties the clock, the client table and the hardware watchdog together.

use blackbox_hal::{Monotonic, WatchdogTimer};

use crate::client::{ClientStatus, ClientTable, SweepOutcome};
use crate::config::SupervisorConfig;
use crate::error::WatchdogResult;

/// Trigger hook invoked when a sweep finds a stalled client.
///
/// By contract the hook never returns: control passes to the fault
/// handler, which captures diagnostics and forces a reset.
pub type TriggerHook = fn(stalled_client: usize) -> !;

/// The layered watchdog supervisor.
///
/// Owns the software watchdog table; the Timer Service schedules
/// [`on_tick`](Self::on_tick) every `sweep_interval_ms`, and the
/// hardware watchdog is reloaded only on an all-healthy pass.
#[derive(Debug)]
pub struct Supervisor<C, const N: usize> {
    clock: C,
    table: ClientTable<N>,
    config: SupervisorConfig,
    trigger: Option<TriggerHook>,
}

impl<C: Monotonic, const N: usize> Supervisor<C, N> {
    /// Builds a supervisor over a validated configuration.
    ///
    /// # Errors
    ///
    /// Propagates [`SupervisorConfig::validate`] failures.
    pub fn new(clock: C, config: SupervisorConfig) -> WatchdogResult<Self> {
        config.validate()?;
        Ok(Self {
            clock,
            table: ClientTable::new(),
            config,
            trigger: None,
        })
    }

    /// Installs the diverging trigger hook. Without one, a failed sweep
    /// still withholds the hardware feed; the hardware watchdog then
    /// does the resetting.
    pub fn register_trigger(&mut self, hook: TriggerHook) {
        self.trigger = Some(hook);
    }

    /// The configuration this supervisor runs under.
    #[must_use]
    pub const fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Registers client `id` with the given liveness period.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidClientId`](crate::WatchdogError::InvalidClientId)
    /// when `id` is outside the table.
    pub fn register(&self, id: usize, period_ms: u32) -> WatchdogResult<()> {
        self.table.register(id, period_ms, self.clock.now_ms())
    }

    /// Records that client `id` is alive. Single atomic store.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidClientId`](crate::WatchdogError::InvalidClientId)
    /// when `id` is outside the table.
    pub fn feed(&self, id: usize) -> WatchdogResult<()> {
        self.table.feed(id, self.clock.now_ms())
    }

    /// Starts the hardware watchdog with the normal-operation timeout.
    /// Called once bring-up is complete, after
    /// [`mark_init_successful`](crate::mark_init_successful).
    pub fn start_hardware_watchdog<W: WatchdogTimer + ?Sized>(&self, hw: &mut W) {
        hw.start(self.config.hardware_timeout_ms);
    }

    /// One scheduled sweep pass.
    ///
    /// Feeds the hardware watchdog only when every client is healthy. On
    /// a trigger, diverges through the installed hook; when no hook is
    /// installed the outcome is returned and the withheld feed lets the
    /// hardware watchdog fire on its own.
    pub fn on_tick<W: WatchdogTimer + ?Sized>(&self, hw: &mut W) -> SweepOutcome {
        let outcome = self.table.sweep(self.clock.now_ms());
        match outcome {
            SweepOutcome::AllHealthy => hw.reload(),
            SweepOutcome::Triggered { id } => {
                if let Some(hook) = self.trigger {
                    hook(id);
                }
            }
        }
        outcome
    }

    /// Snapshot of every enabled client, for the diagnostic surface.
    pub fn client_statuses(&self) -> impl Iterator<Item = ClientStatus> + '_ {
        self.table.statuses(self.clock.now_ms())
    }
}
