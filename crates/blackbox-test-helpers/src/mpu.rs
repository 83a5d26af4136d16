//! Recording memory-protection fake.

use blackbox_hal::{HalResult, MemoryProtection, ProtectedRange};

/// A [`MemoryProtection`] that records what was programmed.
#[derive(Debug, Default)]
pub struct FakeMpu {
    /// The most recently programmed region.
    pub programmed: Option<ProtectedRange>,
    /// Whether protection is currently enabled.
    pub enabled: bool,
}

impl FakeMpu {
    /// An MPU with nothing programmed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryProtection for FakeMpu {
    fn protect(&mut self, range: ProtectedRange) -> HalResult<()> {
        self.programmed = Some(range);
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}
