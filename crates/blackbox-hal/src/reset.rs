//! Reset-cause query and forced system reset.

/// Why the processor most recently came out of reset.
///
/// Read once at startup from the reset-cause status register (clearing the
/// sticky flags) and cached; the initialization watchdog uses it to decide
/// whether the persisted failure counter is still meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetCause {
    /// Power-on or brown-out reset.
    PowerOn,
    /// External reset pin.
    External,
    /// Software-requested reset (including the one the fault handler
    /// forces at the end of the panic sequence).
    Software,
    /// Independent or windowed hardware watchdog reset.
    Watchdog,
    /// The status register carried no recognizable flag.
    #[default]
    Unknown,
}

impl ResetCause {
    /// True when the reset was attributed to a hardware watchdog.
    #[must_use]
    pub fn is_watchdog(self) -> bool {
        matches!(self, Self::Watchdog)
    }

    /// Short name for diagnostic output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PowerOn => "power-on",
            Self::External => "external",
            Self::Software => "software",
            Self::Watchdog => "watchdog",
            Self::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for ResetCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reset-cause query plus the ability to force an immediate system reset.
pub trait ResetControl {
    /// The cached cause of the most recent reset.
    fn reset_cause(&self) -> ResetCause;

    /// Force an immediate system reset. Never returns.
    fn system_reset(&mut self) -> !;
}
