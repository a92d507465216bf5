//! Client error taxonomy

use thiserror::Error;

/// A single connect attempt failed.
///
/// The supervisor treats every variant as retryable; `AuthRejected` is
/// reported distinctly so callers can apply a stricter policy if wanted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// The connect attempt timed out
    #[error("connection timed out: {0}")]
    Timeout(String),

    /// The backend answered with an HTTP-level failure
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },

    /// Credentials were rejected
    #[error("authentication rejected: {0}")]
    AuthRejected(String),
}

impl ConnectError {
    /// Whether this is a credentials problem rather than a transport one
    pub fn is_auth(&self) -> bool {
        matches!(self, ConnectError::AuthRejected(_))
    }
}

/// A device or session operation failed after connect
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    /// Device rejected the command
    #[error("device '{device}' rejected command: {reason}")]
    Rejected { device: String, reason: String },

    /// Session lost its backend connection
    #[error("session no longer connected")]
    Disconnected,
}
