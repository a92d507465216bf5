//! Connection supervisor for the Arlo cloud session
//!
//! The Arlo cloud can be unreachable for minutes or hours at a time, so the
//! integration keeps trying to log in for as long as it takes: attempt a
//! connect, on failure wait with capped exponential backoff, repeat. The only
//! exits are a live session or an external shutdown request, which is honored
//! both between attempts and during the backoff sleep.

mod policy;
mod report;
mod shutdown;

pub use policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY};
pub use report::{AttemptFailure, FailureKind, FailureReporter, LogReporter};
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};

use arlo_client::{ArloConnector, ArloSession, Credentials};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use shutdown::is_shutdown;

/// The supervisor was stopped by a shutdown request before a session came up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("connection supervisor cancelled by shutdown")]
pub struct Cancelled;

/// Runs the login loop until it yields a live session.
///
/// One supervisor invocation performs one connect attempt at a time; run it
/// on its own task so the backoff sleeps do not block unrelated work. No
/// error escapes [`establish`](ConnectionSupervisor::establish): every failed
/// attempt is delivered to the [`FailureReporter`] and retried.
pub struct ConnectionSupervisor {
    policy: RetryPolicy,
    reporter: Arc<dyn FailureReporter>,
    shutdown: ShutdownSignal,
}

impl ConnectionSupervisor {
    pub fn new(
        policy: RetryPolicy,
        reporter: Arc<dyn FailureReporter>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            policy,
            reporter,
            shutdown,
        }
    }

    /// Block until a live session is established or shutdown is requested.
    ///
    /// A session returned by the connector only counts as success if its
    /// liveness check passes; a non-live session is stopped and retried like
    /// any connect error.
    pub async fn establish<C: ArloConnector>(
        &self,
        connector: &C,
        credentials: &Credentials,
    ) -> Result<C::Session, Cancelled> {
        let mut shutdown = self.shutdown.clone();
        let mut attempt: u32 = 1;
        let mut delay = self.policy.base_delay;

        loop {
            if is_shutdown(&shutdown) {
                debug!(attempt, "shutdown requested, abandoning login");
                return Err(Cancelled);
            }
            if attempt > 1 {
                debug!(attempt, "retrying login");
            }

            let failure = match connector.connect(credentials).await {
                Ok(session) if session.is_live() => {
                    debug!(attempt, "login succeeded");
                    return Ok(session);
                }
                Ok(session) => {
                    let last_error = session.last_error();
                    session.stop().await;
                    AttemptFailure::not_live(attempt, last_error)
                }
                Err(err) => AttemptFailure::from_connect_error(attempt, err),
            };

            debug!(attempt, sleep = delay.as_secs(), "lining up a retry");
            self.reporter.connect_failed(&failure);

            // The sleep must stay interruptible so a shutdown request is not
            // delayed by up to max_delay.
            tokio::select! {
                _ = shutdown.wait_for(|stop| *stop) => return Err(Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }

            delay = self.policy.next_delay(delay);
            attempt += 1;
        }
    }
}

/// Convenience constructor with the default 15s/300s policy and log-only
/// reporting
pub fn default_supervisor(shutdown: ShutdownSignal) -> ConnectionSupervisor {
    ConnectionSupervisor::new(RetryPolicy::default(), Arc::new(LogReporter), shutdown)
}
