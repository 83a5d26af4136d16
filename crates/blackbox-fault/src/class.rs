//! The closed classification of fault causes.

use core::fmt;

/// Why the panic path was entered.
///
/// A closed set: every failure source in the firmware maps onto exactly
/// one of these before reaching the common handler. The discriminant is
/// the value persisted in the fault record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum FaultClass {
    /// Explicit call from a module that detected an unrecoverable
    /// invariant violation; the parameter identifies the call site.
    Reported = 1,
    /// Unhandled processor exception routed through the trampoline.
    Exception = 2,
    /// A software watchdog client stalled; the parameter carries its id.
    WatchdogTimeout = 3,
    /// Memory-protection fault whose fault address fell inside the stack
    /// guard region.
    StackGuard = 4,
}

impl FaultClass {
    /// Persisted discriminant.
    #[must_use]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Parses a persisted discriminant.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Reported),
            2 => Some(Self::Exception),
            3 => Some(Self::WatchdogTimeout),
            4 => Some(Self::StackGuard),
            _ => None,
        }
    }

    /// Stable human-readable name, used by the offline decoder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::Exception => "exception",
            Self::WatchdogTimeout => "watchdog-timeout",
            Self::StackGuard => "stack-guard",
        }
    }
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trip_covers_every_class() {
        for class in [
            FaultClass::Reported,
            FaultClass::Exception,
            FaultClass::WatchdogTimeout,
            FaultClass::StackGuard,
        ] {
            assert_eq!(FaultClass::from_raw(class.as_raw()), Some(class));
        }
    }

    #[test]
    fn unknown_discriminants_are_rejected() {
        assert_eq!(FaultClass::from_raw(0), None);
        assert_eq!(FaultClass::from_raw(5), None);
        assert_eq!(FaultClass::from_raw(u32::MAX), None);
    }
}
