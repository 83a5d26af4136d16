//! The software watchdog table and its periodic sweep.

use blackbox_hal::elapsed_ms;
use portable_atomic::{AtomicU32, Ordering};

use crate::error::{WatchdogError, WatchdogResult};

/// Period zero marks a slot as disabled.
const PERIOD_DISABLED: u32 = 0;

struct ClientSlot {
    period_ms: AtomicU32,
    last_feed_ms: AtomicU32,
}

impl ClientSlot {
    const fn new() -> Self {
        Self {
            period_ms: AtomicU32::new(PERIOD_DISABLED),
            last_feed_ms: AtomicU32::new(0),
        }
    }
}

/// Fixed-size table of per-client liveness timers, indexed by
/// caller-assigned id.
///
/// Slots live for the duration of the firmware; registration happens
/// once per id during bring-up, feeds and sweeps run concurrently after
/// that. `feed` is a single atomic timestamp store and may race a sweep
/// read; the race only ever delays detection by one sweep interval.
pub struct ClientTable<const N: usize> {
    slots: [ClientSlot; N],
}

impl<const N: usize> ClientTable<N> {
    /// An empty table; every slot disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { ClientSlot::new() }; N],
        }
    }

    /// Table capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Registers (or re-registers) client `id` with the given period,
    /// seeding its feed timestamp to `now_ms`. A period of zero disables
    /// the slot.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidClientId`] when `id` is outside
    /// the table.
    pub fn register(&self, id: usize, period_ms: u32, now_ms: u32) -> WatchdogResult<()> {
        let slot = self.slot(id)?;
        slot.last_feed_ms.store(now_ms, Ordering::Relaxed);
        slot.period_ms.store(period_ms, Ordering::Relaxed);
        Ok(())
    }

    /// Records that client `id` is alive at `now_ms`.
    ///
    /// A single atomic store; callable from interrupt handlers.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::InvalidClientId`] when `id` is outside
    /// the table.
    pub fn feed(&self, id: usize, now_ms: u32) -> WatchdogResult<()> {
        self.slot(id)?.last_feed_ms.store(now_ms, Ordering::Relaxed);
        Ok(())
    }

    /// Walks every enabled slot and reports the first whose
    /// elapsed-since-feed exceeds its period.
    ///
    /// At most one client is reported per sweep; the caller is expected
    /// to diverge into the fault handler on a trigger, so later expired
    /// slots never matter.
    #[must_use]
    pub fn sweep(&self, now_ms: u32) -> SweepOutcome {
        for (id, slot) in self.slots.iter().enumerate() {
            let period = slot.period_ms.load(Ordering::Relaxed);
            if period == PERIOD_DISABLED {
                continue;
            }
            let last_feed = slot.last_feed_ms.load(Ordering::Relaxed);
            if elapsed_ms(now_ms, last_feed) > period {
                return SweepOutcome::Triggered { id };
            }
        }
        SweepOutcome::AllHealthy
    }

    /// Snapshot of every enabled slot, for the diagnostic surface.
    pub fn statuses(&self, now_ms: u32) -> impl Iterator<Item = ClientStatus> + '_ {
        self.slots.iter().enumerate().filter_map(move |(id, slot)| {
            let period_ms = slot.period_ms.load(Ordering::Relaxed);
            if period_ms == PERIOD_DISABLED {
                return None;
            }
            let last_feed_ms = slot.last_feed_ms.load(Ordering::Relaxed);
            Some(ClientStatus {
                id,
                period_ms,
                last_feed_ms,
                elapsed_ms: elapsed_ms(now_ms, last_feed_ms),
            })
        })
    }

    fn slot(&self, id: usize) -> WatchdogResult<&ClientSlot> {
        self.slots
            .get(id)
            .ok_or(WatchdogError::InvalidClientId { id, capacity: N })
    }
}

impl<const N: usize> Default for ClientTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for ClientTable<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientTable").field("capacity", &N).finish()
    }
}

/// Result of one sweep pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Every enabled client fed within its period; the hardware watchdog
    /// may be reloaded.
    AllHealthy,
    /// The first client found expired. The hardware watchdog must not be
    /// reloaded on this pass.
    Triggered {
        /// Id of the stalled client.
        id: usize,
    },
}

/// One enabled slot, as seen by the diagnostic surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientStatus {
    /// Caller-assigned client id.
    pub id: usize,
    /// Configured liveness period.
    pub period_ms: u32,
    /// Timestamp of the most recent feed.
    pub last_feed_ms: u32,
    /// Milliseconds since that feed.
    pub elapsed_ms: u32,
}
