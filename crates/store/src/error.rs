//! Store-level error model.

use thiserror::Error;

/// Deterministic failures of store mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The tenant slug does not resolve.
    #[error("unknown tenant")]
    UnknownTenant,

    /// Free-plan note limit reached; admission is checked atomically with
    /// the insert.
    #[error("note limit reached")]
    QuotaExceeded,
}
