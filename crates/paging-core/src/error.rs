//! Error types for request-side pagination helpers.
//!
//! Store failures never pass through this type: every [`Store`] reports the
//! error of its underlying driver unchanged through its associated `Error`.
//!
//! [`Store`]: crate::Store

/// Result type for pagination helpers in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while building pagination requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A cursor token could not be decoded.
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Pagination configuration is inconsistent.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl Error {
    /// Creates an invalid cursor error.
    pub fn invalid_cursor(reason: impl Into<String>) -> Self {
        Self::InvalidCursor(reason.into())
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
