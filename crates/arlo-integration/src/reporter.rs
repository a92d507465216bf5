//! Login failure reporting policy
//!
//! Every failed attempt is logged; only the first raises a user-visible
//! notification, so an extended outage does not become a notification storm.

use std::sync::Arc;
use tracing::error;

use arlo_supervisor::{AttemptFailure, FailureReporter};

use crate::notify::{NotificationSink, CONNECT_NOTIFICATION_ID, CONNECT_NOTIFICATION_TITLE};

pub struct NotifyingReporter {
    sink: Arc<dyn NotificationSink>,
}

impl NotifyingReporter {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

impl FailureReporter for NotifyingReporter {
    fn connect_failed(&self, failure: &AttemptFailure) {
        error!(
            attempt = failure.attempt,
            kind = ?failure.kind,
            error = %failure.message,
            "unable to connect to Arlo"
        );
        if failure.first_attempt {
            self.sink.notify(
                CONNECT_NOTIFICATION_ID,
                CONNECT_NOTIFICATION_TITLE,
                &format!(
                    "Error: {}<br />If error persists you might need to change config and restart.",
                    failure.message
                ),
            );
        }
    }
}
