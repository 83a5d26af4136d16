//! Circular ring storage and the frozen snapshot taken at panic time.

use heapless::Vec;

use crate::args::{MAX_ARG_BYTES, MAX_RECORD_BYTES, TraceArg};
use crate::error::{TraceError, TraceResult};

/// Fixed-capacity byte ring with a single write cursor.
///
/// Not synchronized; [`TraceLog`](crate::TraceLog) wraps one of these in
/// a critical-section mutex for shared use. The cursor always addresses
/// the next free byte and writes wrap byte-by-byte, so no record boundary
/// survives the wrap point.
#[derive(Debug)]
pub struct TraceBuffer<const N: usize> {
    bytes: [u8; N],
    cursor: usize,
    active: bool,
    countdown: Option<u32>,
}

impl<const N: usize> TraceBuffer<N> {
    /// An empty, active buffer with the cursor at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            cursor: 0,
            active: true,
            countdown: None,
        }
    }

    /// Buffer capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Next byte to be written, always `< capacity`.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether [`record`](Self::record) currently stores anything.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Activates or deactivates recording. Clears any armed countdown.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.countdown = None;
    }

    /// Arms an auto-disable countdown: the next `n` records are stored,
    /// then the buffer deactivates itself. `n == 0` deactivates
    /// immediately. Useful for capturing one deterministic sequence and
    /// freezing it for inspection.
    pub fn arm_countdown(&mut self, n: u32) {
        if n == 0 {
            self.active = false;
            self.countdown = None;
        } else {
            self.active = true;
            self.countdown = Some(n);
        }
    }

    /// Appends one record: the id byte, then each argument's truncated
    /// big-endian bytes. No-op while inactive.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::ArgBudgetExceeded`] when the arguments total
    /// more than [`MAX_ARG_BYTES`]; nothing is written and an armed
    /// countdown is not consumed.
    pub fn record(&mut self, id: u8, args: &[TraceArg]) -> TraceResult<()> {
        if !self.active {
            return Ok(());
        }

        let mut encoded: Vec<u8, MAX_RECORD_BYTES> = Vec::new();
        // Capacity is MAX_RECORD_BYTES, so the id byte always fits.
        let pushed = encoded.push(id);
        debug_assert!(pushed.is_ok());
        for arg in args {
            if !arg.encode_into(&mut encoded) {
                return Err(TraceError::ArgBudgetExceeded {
                    id,
                    requested: args.iter().map(TraceArg::width).sum(),
                    limit: MAX_ARG_BYTES,
                });
            }
        }

        for byte in &encoded {
            self.bytes[self.cursor] = *byte;
            self.cursor = (self.cursor + 1) % N;
        }

        if let Some(remaining) = self.countdown {
            if remaining <= 1 {
                self.active = false;
                self.countdown = None;
            } else {
                self.countdown = Some(remaining - 1);
            }
        }
        Ok(())
    }

    /// Raw buffer contents, in storage order (not rotated to the cursor).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// A frozen copy of the buffer plus its cursor, the exact form the
    /// fault report persists.
    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot<N> {
        TraceSnapshot {
            bytes: self.bytes,
            cursor: self.cursor as u32,
        }
    }
}

impl<const N: usize> Default for TraceBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen copy of a [`TraceBuffer`] taken at capture time.
#[derive(Clone, Copy, Debug)]
pub struct TraceSnapshot<const N: usize> {
    bytes: [u8; N],
    cursor: u32,
}

impl<const N: usize> TraceSnapshot<N> {
    /// Buffer contents in storage order.
    #[must_use]
    pub fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Cursor position at capture time.
    #[must_use]
    pub const fn cursor(&self) -> u32 {
        self.cursor
    }

    /// Buffer capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn records_lay_out_id_then_big_endian_args() {
        let mut buf: TraceBuffer<16> = TraceBuffer::new();
        buf.record(0x21, &[TraceArg::u16(0x0304), TraceArg::u8(9)])
            .unwrap();
        assert_eq!(buf.cursor(), 4);
        assert_eq!(&buf.as_bytes()[..4], &[0x21, 0x03, 0x04, 0x09]);
    }

    #[test]
    fn writes_wrap_byte_by_byte() {
        let mut buf: TraceBuffer<4> = TraceBuffer::new();
        buf.record(0x21, &[TraceArg::u16(0x1122)]).unwrap();
        buf.record(0x22, &[TraceArg::u16(0x3344)]).unwrap();
        // Second record wraps: its last two bytes overwrite the start.
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.as_bytes(), &[0x33, 0x44, 0x11, 0x22]);
    }

    #[test]
    fn inactive_buffer_drops_records_silently() {
        let mut buf: TraceBuffer<8> = TraceBuffer::new();
        buf.set_active(false);
        buf.record(0x21, &[TraceArg::u32(1)]).unwrap();
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.as_bytes(), &[0; 8]);
    }

    #[test]
    fn countdown_disables_after_exactly_n_records() {
        let mut buf: TraceBuffer<64> = TraceBuffer::new();
        buf.arm_countdown(3);
        for _ in 0..3 {
            assert!(buf.is_active());
            buf.record(0x21, &[]).unwrap();
        }
        assert!(!buf.is_active());
        let cursor = buf.cursor();
        buf.record(0x21, &[]).unwrap();
        assert_eq!(buf.cursor(), cursor);
    }

    #[test]
    fn zero_countdown_deactivates_immediately() {
        let mut buf: TraceBuffer<8> = TraceBuffer::new();
        buf.arm_countdown(0);
        assert!(!buf.is_active());
    }

    #[test]
    fn set_active_clears_a_pending_countdown() {
        let mut buf: TraceBuffer<8> = TraceBuffer::new();
        buf.arm_countdown(1);
        buf.set_active(true);
        buf.record(0x21, &[]).unwrap();
        buf.record(0x21, &[]).unwrap();
        assert!(buf.is_active());
    }

    #[test]
    fn oversized_records_are_rejected_whole() {
        let mut buf: TraceBuffer<32> = TraceBuffer::new();
        buf.arm_countdown(5);
        let args = [TraceArg::u32(1), TraceArg::u32(2), TraceArg::u8(3)];
        let err = buf.record(0x21, &args).unwrap_err();
        assert_eq!(
            err,
            TraceError::ArgBudgetExceeded {
                id: 0x21,
                requested: 9,
                limit: MAX_ARG_BYTES,
            }
        );
        assert_eq!(buf.cursor(), 0);
        // The failed record must not consume the countdown.
        for _ in 0..5 {
            assert!(buf.is_active());
            buf.record(0x21, &[]).unwrap();
        }
        assert!(!buf.is_active());
    }

    #[test]
    fn snapshot_freezes_bytes_and_cursor() {
        let mut buf: TraceBuffer<8> = TraceBuffer::new();
        buf.record(0x30, &[TraceArg::u8(1)]).unwrap();
        let snap = buf.snapshot();
        buf.record(0x31, &[TraceArg::u8(2)]).unwrap();
        assert_eq!(snap.cursor(), 2);
        assert_eq!(&snap.bytes()[..2], &[0x30, 0x01]);
        assert_eq!(snap.bytes()[2], 0);
    }

    proptest! {
        /// The cursor after any record sequence equals the total bytes
        /// written mod capacity, even far past one full wrap.
        #[test]
        fn cursor_tracks_total_bytes_mod_capacity(
            records in prop::collection::vec(
                (any::<u8>(), prop::collection::vec(any::<u32>(), 0..=2)),
                0..64,
            )
        ) {
            let mut buf: TraceBuffer<13> = TraceBuffer::new();
            let mut total = 0usize;
            for (id, values) in &records {
                let args: std::vec::Vec<TraceArg> =
                    values.iter().map(|v| TraceArg::u32(*v)).collect();
                buf.record(*id, &args).unwrap();
                total += 1 + 4 * args.len();
            }
            prop_assert_eq!(buf.cursor(), total % 13);
        }
    }
}
