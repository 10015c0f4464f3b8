//! Authorization failure taxonomy.

use thiserror::Error;

/// Terminal failure of authentication or authorization for one request.
///
/// The token codec's three decode failures are never surfaced individually:
/// the resolver collapses them into [`AuthError::InvalidToken`] so a client
/// cannot distinguish an expired token from a forged one. Guard failures stay
/// distinct because they carry legitimate UX value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header, or not a two-token `Bearer <token>` form.
    #[error("missing bearer credentials")]
    Missing,

    /// Token failed verification, or its claims no longer resolve.
    #[error("authentication failed")]
    InvalidToken,

    /// Role or tenant-ownership violation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Free-plan note limit reached.
    #[error("note limit reached")]
    QuotaExceeded,
}
