//! Supervisor error types.

use thiserror::Error;

/// Errors produced by the watchdog supervisor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogError {
    /// A client id outside the fixed table.
    #[error("client id {id} outside table of {capacity}")]
    InvalidClientId {
        /// Rejected id.
        id: usize,
        /// Table capacity.
        capacity: usize,
    },

    /// A configuration that cannot provide layered protection.
    #[error("invalid supervisor configuration: {reason}")]
    InvalidConfig {
        /// What the validation rejected.
        reason: &'static str,
    },
}

/// Convenience alias for supervisor operations.
pub type WatchdogResult<T> = Result<T, WatchdogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn display_names_the_rejected_id() {
        let err = WatchdogError::InvalidClientId { id: 9, capacity: 8 };
        let text = err.to_string();
        assert!(text.contains('9'));
        assert!(text.contains('8'));
    }
}
