//! Platform fault classification.

use core::fmt;

/// Unrecoverable platform failures.
///
/// The accessory has no degraded mode for a broken store or timer
/// facility; callers are expected to treat any `Fault` as fatal and
/// restart into defaulted state. Data faults (an absent or truncated
/// persisted record) are recovered internally and never surface here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The key-value store failed to read or write a record.
    Store,
    /// The timer facility rejected a start request.
    Timer,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Store => write!(f, "key-value store failure"),
            Fault::Timer => write!(f, "tick timer failure"),
        }
    }
}
