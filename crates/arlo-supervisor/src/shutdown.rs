//! Shutdown signalling for the supervisor
//!
//! Thin wrapper over a `tokio::sync::watch` channel so callers hold a typed
//! handle instead of a bare sender.

use tokio::sync::watch;

/// Receiving side, passed to the supervisor
pub type ShutdownSignal = watch::Receiver<bool>;

/// Sending side, held by whoever owns the integration lifecycle.
///
/// Dropping the handle counts as a shutdown request.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Request shutdown. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }

    /// A fresh signal for another listener
    pub fn signal(&self) -> ShutdownSignal {
        self.tx.subscribe()
    }
}

/// Create a linked handle/signal pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, rx)
}

/// Whether the signal has been raised or its handle dropped
pub(crate) fn is_shutdown(signal: &ShutdownSignal) -> bool {
    *signal.borrow() || signal.has_changed().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_starts_clear() {
        let (_handle, signal) = shutdown_channel();
        assert!(!is_shutdown(&signal));
    }

    #[test]
    fn test_shutdown_raises_signal() {
        let (handle, signal) = shutdown_channel();
        handle.shutdown();
        assert!(is_shutdown(&signal));
        handle.shutdown(); // idempotent
        assert!(is_shutdown(&signal));
    }

    #[test]
    fn test_dropped_handle_counts_as_shutdown() {
        let (handle, signal) = shutdown_channel();
        drop(handle);
        assert!(is_shutdown(&signal));
    }
}
