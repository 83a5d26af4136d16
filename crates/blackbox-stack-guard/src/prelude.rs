//! Convenience re-exports for stack guard users.

pub use crate::error::{GuardError, GuardResult};
pub use crate::guard::{install, is_guard_violation, paint};
pub use crate::region::{GuardRegion, MIN_GUARD_BYTES, SENTINEL};
pub use crate::watermark::{HighWaterMark, scan};
