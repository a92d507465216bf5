//! Per-attempt failure reporting

use arlo_client::ConnectError;
use tracing::error;

/// Why a connect attempt did not yield a usable session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network, timeout or HTTP-level failure; expected to clear on its own
    Transient,
    /// Credentials were rejected. Still retried, but flagged so a caller
    /// could stop retrying on it in a stricter variant.
    AuthRejected,
    /// Connect returned a session whose liveness check failed
    NotLive,
}

/// One failed login attempt, delivered to the reporter exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// 1-based attempt number
    pub attempt: u32,
    /// True only for attempt 1, so a one-time user notification can be raised
    pub first_attempt: bool,
    pub kind: FailureKind,
    pub message: String,
}

impl AttemptFailure {
    pub(crate) fn from_connect_error(attempt: u32, error: ConnectError) -> Self {
        let kind = if error.is_auth() {
            FailureKind::AuthRejected
        } else {
            FailureKind::Transient
        };
        Self {
            attempt,
            first_attempt: attempt == 1,
            kind,
            message: error.to_string(),
        }
    }

    pub(crate) fn not_live(attempt: u32, last_error: Option<String>) -> Self {
        Self {
            attempt,
            first_attempt: attempt == 1,
            kind: FailureKind::NotLive,
            message: last_error.unwrap_or_else(|| "backend reported not connected".to_string()),
        }
    }
}

/// Receives one event per failed attempt.
///
/// The supervisor never fails outward; this is the only channel through which
/// callers observe connect errors.
pub trait FailureReporter: Send + Sync {
    fn connect_failed(&self, failure: &AttemptFailure);
}

/// A reporter that only logs
#[derive(Debug, Default)]
pub struct LogReporter;

impl FailureReporter for LogReporter {
    fn connect_failed(&self, failure: &AttemptFailure) {
        error!(
            attempt = failure.attempt,
            kind = ?failure.kind,
            error = %failure.message,
            "unable to connect to Arlo"
        );
    }
}
