//! High-water-mark scanning over the painted stack area.

use crate::region::SENTINEL;

/// Result of a high-water scan.
///
/// Monotonic within a boot; meaningless across boots because the paint
/// happens once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighWaterMark {
    /// Words from the bottom of the painted area still holding the
    /// sentinel.
    pub untouched_words: usize,
    /// Total words scanned.
    pub scanned_words: usize,
}

impl HighWaterMark {
    /// Untouched headroom below the deepest stack use, in bytes.
    #[must_use]
    pub const fn headroom_bytes(&self) -> usize {
        self.untouched_words * 4
    }

    /// Bytes of the painted area the stack has reached into.
    #[must_use]
    pub const fn used_bytes(&self) -> usize {
        (self.scanned_words - self.untouched_words) * 4
    }

    /// True when the stack has consumed the entire painted area, i.e.
    /// usage reached (or jumped over) the guard region itself.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.untouched_words == 0
    }
}

/// Scans upward from the bottom of the painted area (lowest address
/// first) until a word no longer equals the sentinel.
///
/// `words` must be the same area painted at startup: guard bottom
/// through the startup stack pointer. The boundary found is the deepest
/// point stack usage has reached this boot.
#[must_use]
pub fn scan(words: &[u32]) -> HighWaterMark {
    let untouched = words
        .iter()
        .position(|w| *w != SENTINEL)
        .unwrap_or(words.len());
    HighWaterMark {
        untouched_words: untouched,
        scanned_words: words.len(),
    }
}
