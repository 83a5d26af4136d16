//! Convenience re-exports for trace log users.

pub use crate::args::{MAX_ARG_BYTES, MAX_RECORD_BYTES, TraceArg};
pub use crate::buffer::{TraceBuffer, TraceSnapshot};
pub use crate::error::{TraceError, TraceResult};
pub use crate::ids::{ID_FIRST_ASSIGNABLE, ID_INVALID, ID_TIME_TICK, IdRange};
pub use crate::log::TraceLog;
